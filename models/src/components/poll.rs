use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::Result;
use crate::wire::{from_serde, DecodeContext, WireResource};
use crate::Snowflake;

/// Represents a poll attached to a message
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/poll#poll-object-poll-object-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Poll {
    pub question: PollMedia,
    pub answers: Vec<PollAnswer>,
    /// Null for non-expiring polls
    pub expiry: Option<DateTime<Utc>>,
    pub allow_multiselect: bool,
    pub layout_type: PollLayoutType,
    /// May be absent while the poll is running; counts are then unknown,
    /// not zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<PollResults>,
}

impl WireResource for Poll {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "poll")
    }
}

/// The text and/or emoji of a poll question or answer
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/poll#poll-media-object-poll-media-object-structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct PollMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PollMediaEmoji>,
}

/// The partial emoji of a poll media, either a custom emoji id or a unicode
/// emoji name
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct PollMediaEmoji {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Represents one answer of a poll
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/poll#poll-answer-object-poll-answer-object-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PollAnswer {
    /// Only sent as part of responses from the gateway and the API
    pub answer_id: u64,
    pub poll_media: PollMedia,
}

/// Represents the current vote tally of a poll
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/poll#poll-results-object-poll-results-object-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PollResults {
    /// Whether the votes have been precisely counted after the poll ended
    pub is_finalized: bool,
    pub answer_counts: Vec<PollAnswerCount>,
}

/// The vote count of a single poll answer
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PollAnswerCount {
    pub id: u64,
    pub count: u64,
    /// Whether the current user voted for this answer
    pub me_voted: bool,
}

/// Represent the layout of a poll
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PollLayoutType {
    Default,
    Unknown(u64),
}

impl PollLayoutType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Default => 1,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Default,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for PollLayoutType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for PollLayoutType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}
