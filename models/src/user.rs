use std::fmt::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::Result;
use crate::wire::{from_serde, DecodeContext, WireResource};
use crate::Snowflake;

/// Represent the id of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub Snowflake);

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id.into())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl From<User> for UserId {
    fn from(user: User) -> Self {
        user.id
    }
}

impl From<&User> for UserId {
    fn from(user: &User) -> Self {
        user.id.clone()
    }
}

impl WireResource for UserId {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        Ok(Self(Snowflake::from_raw(raw, ctx)?))
    }
}

/// Represent a User
///
/// Reference:
/// - [User](https://discord.com/developers/docs/resources/user#user-object)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub discriminator: Option<String>,
    /// The user's display name, if it is set. For bots, this is the
    /// application name
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub global_name: Option<Option<String>>,
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub banner: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Option<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<NitroType>,
}

impl User {
    pub fn avatar_url(&self, size: usize, dynamic: bool, extension: impl Display) -> Option<String> {
        let hash = self.avatar.clone()?;

        let mut extension = extension.to_string();
        if dynamic && hash.starts_with("a_") {
            extension = "gif".to_string()
        }

        Some(
            format!(
                "https://cdn.discordapp.com/avatars/{id}/{hash}.{extension}?size={size}",
                id = self.id,
                hash = hash
            )
        )
    }
}

impl WireResource for User {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "user")
    }
}

/// Represent the premium tier of a user
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum NitroType {
    None,
    NitroClassic,
    Nitro,
    NitroBasic,
    Unknown(u64),
}

impl NitroType {
    pub fn code(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::NitroClassic => 1,
            Self::Nitro => 2,
            Self::NitroBasic => 3,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::None,
            1 => Self::NitroClassic,
            2 => Self::Nitro,
            3 => Self::NitroBasic,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for NitroType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for NitroType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represent the partial application attached to a message sent with Rich
/// Presence or by an application-owned webhook
///
/// Reference:
/// - [Application](https://discord.com/developers/docs/resources/application#application-object)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Application {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl Application {
    pub fn icon_url(&self, size: usize, extension: impl Display) -> Option<String> {
        let hash = self.cover_image.clone()?;

        Some(
            format!(
                "https://cdn.discordapp.com/app-icons/{id}/{hash}.{extension}?size={size}",
                id = self.id,
                hash = hash,
                extension = extension,
                size = size
            )
        )
    }
}

impl WireResource for Application {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "application")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn user_round_trips_with_its_optional_surface() {
        let raw = json!({
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "global_name": null,
            "avatar": "8342729096ea3675442027381ff50dfe",
            "public_flags": 64
        });

        let user: User = crate::from_value(&raw).unwrap();
        assert_eq!(user.global_name, Some(None));
        assert_eq!(user.bot, None);
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn premium_type_keeps_undocumented_codes() {
        assert_eq!(NitroType::from_code(9), NitroType::Unknown(9));
        assert_eq!(serde_json::to_value(NitroType::Unknown(9)).unwrap(), json!(9));
    }

    #[test]
    fn avatar_url_is_animated_when_the_hash_says_so() {
        let user: User = crate::from_value(&json!({
            "id": "1",
            "username": "Nelly",
            "discriminator": "0",
            "avatar": "a_8342729096ea3675442027381ff50dfe"
        })).unwrap();

        assert!(user.avatar_url(1024, true, "png").unwrap().ends_with(".gif?size=1024"));
    }
}
