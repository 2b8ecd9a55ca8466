use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Will be used each time an error can occur
pub type Result<T> = core::result::Result<T, Error>;

/// Represent an error
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Error {
    Model(ModelError),
    Validation(ValidationError),
}

impl From<serde_json::error::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Model(ModelError::Deserialize(value.to_string()))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

/// Represent an error that can occur inside a model
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum ModelError {
    InvalidSnowflake(String),
    MissingField(String),
    InvalidPayload(String),
    InvalidTimestamp(String),
    InvalidBitSet(String),
    Deserialize(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ModelError {}

/// Represent an error raised by the strict validation mode
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum ValidationError {
    /// A mention category is both parsed and listed explicitly
    MentionExclusivity(String),
    /// Both `emoji_id` and `emoji_name` carry a value
    EmojiExclusivity(String),
    InapplicableField(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ValidationError {}
