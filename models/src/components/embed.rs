use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::Result;
use crate::components::Color;
use crate::wire::{from_serde, DecodeContext, WireResource};

/// Represents embedded content in a message.
///
/// Unlike the channel and message discriminants, the `kind` of an embed does
/// not gate which sub-structures are present: any of author, footer, image,
/// video, thumbnail, provider or fields may appear regardless of the
/// declared kind, so every field stays independently optional.
///
/// Reference:
/// - [Embed Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Always `rich` for webhook embeds
    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EmbedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedVideo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl Embed {
    /// Create a new embed without any fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title of the embed
    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description of the embed
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the color of the embed
    pub fn set_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Add a field to the embed
    pub fn add_field(mut self, field: Field) -> Self {
        match self.fields {
            Some(ref mut fields) => fields.push(field),
            None => self.fields = Some(vec![field])
        }
        self
    }
}

impl WireResource for Embed {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "embed")
    }
}

/// Represent the type of an embed
///
/// A soft discriminant, see [`Embed`]. Undocumented kinds are preserved as
/// [`EmbedType::Unknown`].
///
/// Reference:
/// - [Embed Type](https://discord.com/developers/docs/resources/channel#embed-object-embed-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum EmbedType {
    #[default]
    Rich,
    Image,
    Video,
    Gifv,
    Article,
    Link,
    Unknown(String),
}

impl EmbedType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rich => "rich",
            Self::Image => "image",
            Self::Video => "video",
            Self::Gifv => "gifv",
            Self::Article => "article",
            Self::Link => "link",
            Self::Unknown(kind) => kind,
        }
    }

    pub fn from_str(kind: &str) -> Self {
        match kind {
            "rich" => Self::Rich,
            "image" => Self::Image,
            "video" => Self::Video,
            "gifv" => Self::Gifv,
            "article" => Self::Article,
            "link" => Self::Link,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl Serialize for EmbedType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmbedType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: String = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

/// Represents a footer in an embed
///
/// Reference:
/// - [Embed Footer Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-footer-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct Footer {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

/// Represents an image in an embed
///
/// Reference:
/// - [Embed Image Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-image-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct EmbedImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

impl EmbedImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            proxy_url: None,
            height: None,
            width: None
        }
    }
}

/// Represents a thumbnail in an embed
///
/// Reference:
/// - [Embed Thumbnail Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-thumbnail-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

impl Thumbnail {
    /// Create a new thumbnail with the given url
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            proxy_url: None,
            height: None,
            width: None
        }
    }
}

/// Represents a video in an embed
///
/// Only ever received, never sent.
///
/// Reference:
/// - [Embed Video Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-video-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct EmbedVideo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

/// Represents a provider in an embed
///
/// Reference:
/// - [Embed Provider Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-provider-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct Provider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Represents an author in an embed
///
/// Reference:
/// - [Embed Author Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-author-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

/// Represents a field in an embed
///
/// Reference:
/// - [Embed Field Structure](https://discord.com/developers/docs/resources/channel#embed-object-embed-field-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct Field {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: None,
        }
    }

    /// Set the inline of the field
    pub fn set_inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn embed_tolerates_sub_structures_on_any_kind() {
        // an image embed still carrying fields and an author is valid
        let raw = json!({
            "type": "image",
            "url": "https://example.com",
            "author": { "name": "someone" },
            "fields": [{ "name": "a", "value": "b" }]
        });

        let embed: Embed = crate::from_value(&raw).unwrap();
        assert_eq!(embed.kind, Some(EmbedType::Image));
        assert_eq!(embed.author.as_ref().unwrap().name, "someone");
        assert_eq!(serde_json::to_value(&embed).unwrap(), raw);
    }

    #[test]
    fn embed_type_keeps_undocumented_kinds() {
        let kind = EmbedType::from_str("auto_moderation_message");
        assert_eq!(kind, EmbedType::Unknown("auto_moderation_message".into()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("auto_moderation_message"));
    }

    #[test]
    fn embed_builder_surface() {
        let embed = Embed::new()
            .set_title("title")
            .set_color(Color::from_hex("#5865F2"))
            .add_field(Field::new("a", "b").set_inline(true));

        assert_eq!(embed.color, Some(Color(0x5865F2)));
        assert_eq!(embed.fields.unwrap().len(), 1);
    }
}
