use std::collections::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::{Error, ModelError, Result};
use crate::channel::Channel;
use crate::guild::{GuildMember, Role};
use crate::message::Attachment;
use crate::user::User;
use crate::wire::{from_serde, DecodeContext, DecodeWarning, WireResource};
use crate::Snowflake;

/// The type of an interaction
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    /// Forward-compatibility escape value carrying the raw code
    Unknown(u64),
}

impl InteractionType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Ping => 1,
            Self::ApplicationCommand => 2,
            Self::MessageComponent => 3,
            Self::ApplicationCommandAutocomplete => 4,
            Self::ModalSubmit => 5,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for InteractionType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for InteractionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

impl WireResource for InteractionType {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let code = match raw.as_u64() {
            Some(code) => code,
            None => return Err(Error::Model(ModelError::InvalidPayload("Failed to parse interaction type".into())))
        };

        let kind = Self::from_code(code);
        if let Self::Unknown(code) = &kind {
            ctx.warn(DecodeWarning::UnknownEnumCode {
                enumeration: "interaction type".into(),
                code: code.to_string(),
            });
        }
        Ok(kind)
    }
}

/// The installation context an application was authorized for
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/application#application-object-application-integration-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ApplicationIntegrationType {
    GuildInstall,
    UserInstall,
    Unknown(u64),
}

impl ApplicationIntegrationType {
    pub fn code(&self) -> u64 {
        match self {
            Self::GuildInstall => 0,
            Self::UserInstall => 1,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::GuildInstall,
            1 => Self::UserInstall,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for ApplicationIntegrationType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for ApplicationIntegrationType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Attached to a message that is a response to an interaction
///
/// Superseded upstream by the interaction metadata object but still sent.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#message-object-message-interaction-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MessageInteraction {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Name of the invoked application command
    pub name: String,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
}

impl WireResource for MessageInteraction {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "message interaction")
    }
}

/// Data resolved from the ids sent with an interaction
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-resolved-data-structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolvedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<HashMap<Snowflake, User>>,
    /// Partial members, missing user/deaf/mute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<HashMap<Snowflake, GuildMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<HashMap<Snowflake, Role>>,
    /// Partial channels, voice channels also carry their thread metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<HashMap<Snowflake, Channel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<Snowflake, Attachment>>,
}

impl WireResource for ResolvedData {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "resolved data")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn every_documented_interaction_type_decodes() {
        for code in 1..=5 {
            assert!(!matches!(InteractionType::from_code(code), InteractionType::Unknown(_)));
            assert_eq!(InteractionType::from_code(code).code(), code);
        }
        assert_eq!(InteractionType::from_code(9), InteractionType::Unknown(9));
    }

    #[test]
    fn resolved_data_maps_are_keyed_by_snowflake() {
        let raw = json!({
            "users": {
                "80351110224678912": {
                    "id": "80351110224678912",
                    "username": "Nelly",
                    "discriminator": "1337",
                    "avatar": null
                }
            }
        });

        let resolved: ResolvedData = crate::from_value(&raw).unwrap();
        let users = resolved.users.as_ref().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.contains_key(&Snowflake::from("80351110224678912")));
        assert_eq!(serde_json::to_value(&resolved).unwrap(), raw);
    }
}
