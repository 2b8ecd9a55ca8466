//! Typed representations of the channel and message resources of the
//! Discord REST API.
//!
//! Raw JSON payloads received from the transport layer are decoded against
//! this schema into immutable value objects. Transport, rate limiting,
//! caching and gateway dispatch are not handled here.

use std::fmt::Display;
use std::num::ParseIntError;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::{Error, ModelError, Result};
use crate::channel::Channel;
use crate::message::Message;
use crate::wire::{DecodeContext, DecodeOptions, DecodeWarning, WireResource};

pub mod wire;
pub mod validation;
pub mod channel;
pub mod message;
pub mod user;
pub mod guild;
pub mod interaction;
pub mod components;

/// Represent a Discord snowflake
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Snowflake(pub String);

pub const DISCORD_EPOCH: u64 = 1420070400000;

impl Snowflake {
    /// Decode the millisecond timestamp embedded in the snowflake
    pub fn get_timestamp(&self) -> Result<DateTime<Utc>> {
        let snowflake = match self.0.parse::<u64>() {
            Ok(snowflake) => snowflake,
            Err(_) => return Err(Error::Model(ModelError::InvalidSnowflake("Failed to parse snowflake".into())))
        };

        let timestamp = (snowflake >> 22) + DISCORD_EPOCH;

        match Utc.timestamp_millis_opt(timestamp as i64).single() {
            Some(datetime) => Ok(datetime),
            None => Err(Error::Model(ModelError::InvalidSnowflake("Failed to convert timestamp to DateTime<Utc>".into())))
        }
    }
}

impl From<&str> for Snowflake {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}
impl From<String> for Snowflake {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for Snowflake {
    fn from(s: &String) -> Self {
        Self(s.into())
    }
}

impl From<&Snowflake> for Snowflake {
    fn from(s: &Snowflake) -> Self {
        s.clone()
    }
}

impl From<Snowflake> for String {
    fn from(value: Snowflake) -> Self {
        value.0
    }
}

impl Display for Snowflake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl WireResource for Snowflake {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        match raw.as_str() {
            Some(snowflake) => Ok(Self(snowflake.into())),
            None => Err(Error::Model(ModelError::InvalidSnowflake(format!("Failed to parse snowflake: {raw:?}"))))
        }
    }
}

/// Contain every informations given by a snowflake
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SnowflakeInfo {
    pub timestamp: DateTime<Utc>,
    pub worker_id: u16,
    pub process_id: u16,
    pub sequence: u16,
}

impl TryFrom<&Snowflake> for SnowflakeInfo {
    type Error = ParseIntError;

    fn try_from(snowflake: &Snowflake) -> std::result::Result<Self, Self::Error> {
        let snowflake = snowflake.0.parse::<u64>()?;

        let milliseconds = (snowflake >> 22) + DISCORD_EPOCH;
        let timestamp = Utc.timestamp_millis_opt(milliseconds as i64)
            .single()
            .unwrap_or_default();

        Ok(SnowflakeInfo {
            timestamp,
            worker_id: ((snowflake & 0x3E0000) >> 17) as u16,
            process_id: ((snowflake & 0x1F000) >> 12) as u16,
            sequence: (snowflake & 0xFFF) as u16,
        })
    }
}

/// A permission bit set.
///
/// Wire-encoded as a decimal-digit string because the bit space exceeds the
/// safe integer precision of several consumers, exactly like [`Snowflake`].
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/topics/permissions)
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Permissions(pub u64);

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine multiple permission bits
    pub fn combine(bits: &[u64]) -> Self {
        let mut permissions = Self::default();
        permissions.add_flags(bits);
        permissions
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `flag` is set
    pub fn has(&self, flag: u64) -> bool {
        self.0 & flag == flag
    }

    /// A copy with the given bits cleared
    pub fn without(&self, flag: u64) -> Self {
        Self(self.0 & !flag)
    }

    /// Add a flag
    pub fn add_flag(&mut self, flag: u64) {
        self.0 |= flag;
    }

    /// Add multiple flags
    pub fn add_flags(&mut self, flags: &[u64]) {
        for &flag in flags {
            self.add_flag(flag);
        }
    }

    /// Remove a flag
    pub fn remove_flag(&mut self, flag: u64) {
        self.0 &= !flag;
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: String = Deserialize::deserialize(deserializer)?;

        match value.parse::<u64>() {
            Ok(bits) => Ok(Self(bits)),
            Err(_) => Err(serde::de::Error::custom(format!("invalid permission bit set: {value}")))
        }
    }
}

impl WireResource for Permissions {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        let bits = raw.as_str()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| Error::Model(ModelError::InvalidBitSet(format!("Failed to parse permission bit set: {raw:?}"))))?;

        Ok(Self(bits))
    }
}

/// Parse an ISO-8601 timestamp, accepting any offset and normalizing to UTC
pub(crate) fn parse_timestamp(resource: &str, field: &str, raw: &Value) -> Result<DateTime<Utc>> {
    let Some(text) = raw.as_str() else {
        return Err(Error::Model(ModelError::InvalidTimestamp(format!(
            "Field '{field}' of the {resource} is not a timestamp string"
        ))));
    };

    match DateTime::parse_from_rfc3339(text) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => Err(Error::Model(ModelError::InvalidTimestamp(format!(
            "Invalid timestamp '{text}' for field '{field}' of the {resource}"
        ))))
    }
}

/// A decoded resource together with the non-fatal findings collected along
/// the way
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<DecodeWarning>,
}

/// Decode a channel payload with the default options
pub fn decode_channel(raw: &Value) -> Result<Decoded<Channel>> {
    decode_channel_with(raw, DecodeOptions::default())
}

pub fn decode_channel_with(raw: &Value, options: DecodeOptions) -> Result<Decoded<Channel>> {
    let mut ctx = DecodeContext::new(options);
    let value = Channel::from_raw(raw, &mut ctx)?;

    Ok(Decoded { value, warnings: ctx.into_warnings() })
}

/// Decode a message payload with the default options
pub fn decode_message(raw: &Value) -> Result<Decoded<Message>> {
    decode_message_with(raw, DecodeOptions::default())
}

pub fn decode_message_with(raw: &Value, options: DecodeOptions) -> Result<Decoded<Message>> {
    let mut ctx = DecodeContext::new(options);
    let value = Message::from_raw(raw, &mut ctx)?;

    Ok(Decoded { value, warnings: ctx.into_warnings() })
}

/// Deserialize any model type from a raw value, reporting the JSON path of a
/// failure
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    match serde_path_to_error::deserialize(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) => Err(Error::Model(ModelError::Deserialize(err.to_string())))
    }
}

/// Deserialize any model type from a JSON document, reporting the JSON path
/// of a failure
pub fn from_json_str<T: DeserializeOwned>(payload: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(payload);

    match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(decoded) => Ok(decoded),
        Err(err) => Err(Error::Model(ModelError::Deserialize(err.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn snowflake_keeps_its_string_form() {
        let id = Snowflake::from("175928847299117063");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("175928847299117063"));
    }

    #[test]
    fn snowflake_timestamp_is_decoded_against_the_epoch() {
        let id = Snowflake::from("175928847299117063");
        let timestamp = id.get_timestamp().unwrap();
        assert_eq!(timestamp.to_rfc3339(), "2016-04-30T11:18:25.796+00:00");
    }

    #[test]
    fn snowflake_info_extracts_the_internal_fields() {
        let info = SnowflakeInfo::try_from(&Snowflake::from("175928847299117063")).unwrap();
        assert_eq!(info.worker_id, 1);
        assert_eq!(info.process_id, 0);
        assert_eq!(info.sequence, 7);
    }

    #[test]
    fn permissions_travel_as_decimal_strings() {
        let raw = json!("2251799813685247");
        let permissions: Permissions = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(permissions.0, 2251799813685247);
        assert_eq!(serde_json::to_value(&permissions).unwrap(), raw);
    }

    #[test]
    fn permissions_refuse_raw_integers() {
        assert!(serde_json::from_value::<Permissions>(json!(8)).is_err());
    }

    #[test]
    fn permission_algebra() {
        let both = Permissions::combine(&[1 << 3, 1 << 10]);
        assert!(both.has(1 << 3));
        assert!(both.has(1 << 10));
        assert!(!both.without(1 << 3).has(1 << 3));
        assert!(both.without(1 << 3).has(1 << 10));
    }
}
