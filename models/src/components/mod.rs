pub mod embed;
pub mod sticker;
pub mod poll;
pub mod message_components;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use error::Result;
use crate::user::User;
use crate::wire::{from_serde, DecodeContext, WireResource};
use crate::Snowflake;

/// A color, wire-encoded as an integer
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct Color(pub u64);

impl Color {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(u64::from_str_radix(&hex.into().replace('#', ""), 16).unwrap_or(0))
    }
}

impl From<String> for Color {
    fn from(color: String) -> Self {
        Self::from_hex(color)
    }
}

/// Represents a custom emoji
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/emoji#emoji-object-emoji-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Emoji {
    /// Null for unicode emojis
    pub id: Option<Snowflake>,
    pub name: String,
    /// Roles allowed to use this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Snowflake>>,
    /// The user that created this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Whether this emoji must be wrapped in colons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_colons: Option<bool>,
    /// Whether this emoji is managed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,
    /// Whether this emoji is animated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    /// Whether this emoji is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Emoji {
    pub fn new(id: Option<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: None,
            user: None,
            require_colons: None,
            managed: None,
            animated: None,
            available: None,
        }
    }
}

impl WireResource for Emoji {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "emoji")
    }
}
