use std::fmt::{Display, Formatter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use error::{Error, ModelError, Result};

/// A resource that can be decoded from a raw wire payload.
///
/// Decoding is threaded through a [`DecodeContext`] so that nested resources
/// share the reference depth counter, the strictness options and the warning
/// sink of the top-level call.
pub trait WireResource: Sized {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self>;
}

/// Options for a decode pass.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Promote the advisory invariants to hard errors and run the per-kind
    /// field applicability checks
    pub strict: bool,
    /// How many levels of `referenced_message` (and triggering interaction
    /// metadata) are decoded before the chain is truncated
    pub max_reference_depth: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_reference_depth: 1,
        }
    }
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true, ..Self::default() }
    }
}

/// State threaded through every `from_raw` call of a decode pass
#[derive(Debug, Default)]
pub struct DecodeContext {
    pub options: DecodeOptions,
    depth: u64,
    warnings: Vec<DecodeWarning>,
}

impl DecodeContext {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options, depth: 0, warnings: Vec::new() }
    }

    /// Record a non-fatal finding
    pub fn warn(&mut self, warning: DecodeWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Whether another level of message reference may still be decoded
    pub fn reference_allowed(&self) -> bool {
        self.depth < self.options.max_reference_depth
    }

    pub fn enter_reference(&mut self) {
        self.depth += 1;
    }

    pub fn leave_reference(&mut self) {
        self.depth -= 1;
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<DecodeWarning> {
        self.warnings
    }
}

/// A non-fatal finding collected while decoding a payload
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum DecodeWarning {
    /// An enumeration code outside the documented set was kept as an
    /// escape value instead of being rejected
    UnknownEnumCode { enumeration: String, code: String },
    /// A field is present although it does not apply to the resource kind
    InapplicableField { resource: String, field: String, kind: String },
    /// A field mandated by the resource kind is absent
    MissingFieldForKind { resource: String, field: String, kind: String },
    /// Both `emoji_id` and `emoji_name` carry a value
    EmojiExclusivity { structure: String },
    /// A mention category is both parsed and listed explicitly
    MentionExclusivity { category: String },
    /// A nested message reference was omitted because the configured
    /// traversal depth was reached
    ReferenceDepthExceeded { resource: String },
    /// A malformed element of an array was skipped instead of failing the
    /// enclosing resource
    SkippedElement { resource: String, field: String, reason: String },
}

impl Display for DecodeWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEnumCode { enumeration, code } =>
                write!(f, "Unknown code {code} for the {enumeration} enumeration"),
            Self::InapplicableField { resource, field, kind } =>
                write!(f, "Field '{field}' is present on the {resource} but does not apply to kind {kind}"),
            Self::MissingFieldForKind { resource, field, kind } =>
                write!(f, "Field '{field}' is missing on the {resource} although kind {kind} mandates it"),
            Self::EmojiExclusivity { structure } =>
                write!(f, "Both 'emoji_id' and 'emoji_name' carry a value on the {structure}"),
            Self::MentionExclusivity { category } =>
                write!(f, "Mention category '{category}' is parsed and listed explicitly at the same time"),
            Self::ReferenceDepthExceeded { resource } =>
                write!(f, "Nested {resource} was omitted, maximum reference depth reached"),
            Self::SkippedElement { resource, field, reason } =>
                write!(f, "Skipped a malformed element of '{field}' on the {resource}: {reason}"),
        }
    }
}

// ---- field helpers -------------------------------------------------------

pub(crate) fn missing(resource: &str, field: &str) -> Error {
    Error::Model(ModelError::MissingField(format!(
        "Field '{field}' is missing for the {resource}"
    )))
}

pub(crate) fn mismatch(resource: &str, field: &str) -> Error {
    Error::Model(ModelError::InvalidPayload(format!(
        "Field '{field}' of the {resource} does not have the expected type"
    )))
}

pub(crate) fn require_str<'a>(raw: &'a Value, resource: &str, field: &str) -> Result<&'a str> {
    match raw.get(field) {
        Some(value) => value.as_str().ok_or_else(|| mismatch(resource, field)),
        None => Err(missing(resource, field)),
    }
}

pub(crate) fn require_u64(raw: &Value, resource: &str, field: &str) -> Result<u64> {
    match raw.get(field) {
        Some(value) => value.as_u64().ok_or_else(|| mismatch(resource, field)),
        None => Err(missing(resource, field)),
    }
}

pub(crate) fn require_bool(raw: &Value, resource: &str, field: &str) -> Result<bool> {
    match raw.get(field) {
        Some(value) => value.as_bool().ok_or_else(|| mismatch(resource, field)),
        None => Err(missing(resource, field)),
    }
}

/// Decode an optional-and-nullable field into its three states:
/// absent -> `None`, null -> `Some(None)`, value -> `Some(Some(..))`
pub(crate) fn decode_nullable<T, F>(raw: &Value, field: &str, decode: F) -> Result<Option<Option<T>>>
where
    F: FnOnce(&Value) -> Result<T>,
{
    match raw.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(value) => Ok(Some(Some(decode(value)?))),
    }
}

/// Decode an optional (but never null) field
pub(crate) fn decode_optional<T, F>(raw: &Value, field: &str, decode: F) -> Result<Option<T>>
where
    F: FnOnce(&Value) -> Result<T>,
{
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode(value).map(Some),
    }
}

/// Decode the elements of an array field, skipping malformed elements with a
/// [`DecodeWarning::SkippedElement`] instead of failing the enclosing
/// resource
pub(crate) fn decode_elements<T: WireResource>(
    raw: &Value,
    resource: &str,
    field: &str,
    ctx: &mut DecodeContext,
) -> Vec<T> {
    let Some(elements) = raw.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut decoded = Vec::with_capacity(elements.len());
    for element in elements {
        match T::from_raw(element, ctx) {
            Ok(value) => decoded.push(value),
            Err(err) => ctx.warn(DecodeWarning::SkippedElement {
                resource: resource.to_string(),
                field: field.to_string(),
                reason: err.to_string(),
            }),
        }
    }
    decoded
}

/// Decode an optional nested structure, downgrading a failure to a
/// [`DecodeWarning::SkippedElement`] so that one malformed sub-structure
/// does not fail the enclosing resource
pub(crate) fn decode_tolerant<T, F>(
    raw: &Value,
    resource: &str,
    field: &str,
    ctx: &mut DecodeContext,
    decode: F,
) -> Option<T>
where
    F: FnOnce(&Value, &mut DecodeContext) -> Result<T>,
{
    let value = raw.get(field)?;
    if value.is_null() {
        return None;
    }

    match decode(value, ctx) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            ctx.warn(DecodeWarning::SkippedElement {
                resource: resource.to_string(),
                field: field.to_string(),
                reason: err.to_string(),
            });
            None
        }
    }
}

/// Deserialize a whole resource through serde, reporting the JSON path of a
/// failure
pub(crate) fn from_serde<T: DeserializeOwned>(raw: &Value, resource: &str) -> Result<T> {
    match serde_path_to_error::deserialize(raw) {
        Ok(value) => Ok(value),
        Err(err) => Err(Error::Model(ModelError::Deserialize(format!("{resource}: {err}")))),
    }
}

/// Deserialize an optional-and-nullable field into both of its option
/// layers.
///
/// Serde's own `Option` impl maps an explicit null to `None` before the
/// inner option is ever consulted, which would collapse "present and null"
/// into "absent". Routing the field through this adapter keeps the outer
/// option for key presence and the inner one for nullability; pair it with
/// `default` and `skip_serializing_if = "Option::is_none"`.
pub(crate) fn double_option<'de, T, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn nullable_fields_keep_their_three_states() {
        let raw = json!({ "topic": null, "name": "general" });

        let absent = decode_nullable(&raw, "icon", |v| Ok(v.clone())).unwrap();
        let null = decode_nullable(&raw, "topic", |v| Ok(v.clone())).unwrap();
        let value = decode_nullable(&raw, "name", |v| Ok(v.clone())).unwrap();

        assert_eq!(absent, None);
        assert_eq!(null, Some(None));
        assert_eq!(value, Some(Some(json!("general"))));
    }

    #[test]
    fn required_fields_name_the_resource_and_field() {
        let raw = json!({});
        let err = require_str(&raw, "channel", "id").unwrap_err();
        assert!(err.to_string().contains("Field 'id' is missing for the channel"));
    }

    #[test]
    fn reference_depth_is_counted_against_the_options() {
        let mut ctx = DecodeContext::new(DecodeOptions { strict: false, max_reference_depth: 1 });
        assert!(ctx.reference_allowed());
        ctx.enter_reference();
        assert!(!ctx.reference_allowed());
        ctx.leave_reference();
        assert!(ctx.reference_allowed());
    }
}
