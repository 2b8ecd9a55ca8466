use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::Result;
use crate::user::User;
use crate::wire::{from_serde, DecodeContext, WireResource};
use crate::Snowflake;

/// Represent the format of a sticker
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/sticker#sticker-object-sticker-format-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum StickerFormatType {
    Png,
    Apng,
    Lottie,
    Gif,
    Unknown(u64),
}

impl StickerFormatType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Png => 1,
            Self::Apng => 2,
            Self::Lottie => 3,
            Self::Gif => 4,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Png,
            2 => Self::Apng,
            3 => Self::Lottie,
            4 => Self::Gif,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for StickerFormatType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for StickerFormatType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represents a full sticker object.
///
/// Only carried by the deprecated `stickers` field of a message; newer
/// payloads send the reduced sticker items instead.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/sticker#sticker-object-sticker-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Sticker {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<Snowflake>,
    pub name: String,
    pub description: Option<String>,
    /// Autocomplete/suggestion tags (max 200 characters)
    pub tags: String,
    #[serde(rename = "type")]
    pub kind: u64,
    pub format_type: StickerFormatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<u64>,
}

impl WireResource for Sticker {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "sticker")
    }
}
