use std::fmt::Display;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use error::Result;
use crate::user::User;
use crate::wire::{from_serde, DecodeContext, WireResource};
use crate::{Permissions, Snowflake};

/// Represent the id of a guild
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct GuildId(pub Snowflake);

impl From<String> for GuildId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for GuildId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl WireResource for GuildId {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        Ok(Self(Snowflake::from_raw(raw, ctx)?))
    }
}

/// Represents a guild member
///
/// Reference:
/// - [Guild Member](https://discord.com/developers/docs/resources/guild#guild-member-object)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GuildMember {
    /// Not included in the member objects attached to MESSAGE_CREATE and
    /// MESSAGE_UPDATE gateway events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub nick: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
    pub roles: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaf: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    #[serde(default)]
    pub flags: u64,
    /// Whether the user has not yet passed the guild's membership screening
    /// requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    /// Total permissions in the channel, only included in interaction
    /// resolved data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub communication_disabled_until: Option<Option<DateTime<Utc>>>,
}

impl WireResource for GuildMember {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "guild member")
    }
}

/// Represents a guild role, as exposed by interaction resolved data
///
/// Reference:
/// - [Role](https://discord.com/developers/docs/topics/permissions#role-object)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub color: u64,
    /// Whether the role is pinned in the user listing
    pub hoist: bool,
    pub position: u64,
    pub permissions: Permissions,
    pub managed: bool,
    pub mentionable: bool,
}

impl WireResource for Role {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "role")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn member_round_trips_with_nick_states() {
        let raw = json!({
            "user": {
                "id": "80351110224678912",
                "username": "Nelly",
                "discriminator": "1337",
                "avatar": null
            },
            "nick": null,
            "roles": ["41771983423143936"],
            "joined_at": "2015-04-26T06:26:56.936Z",
            "flags": 0
        });

        let member: GuildMember = crate::from_value(&raw).unwrap();
        assert_eq!(member.nick, Some(None));
        assert_eq!(member.avatar, None);
        assert_eq!(serde_json::to_value(&member).unwrap(), raw);
    }

    #[test]
    fn role_permissions_stay_in_string_form() {
        let raw = json!({
            "id": "41771983423143936",
            "name": "WE DEM BOYZZ!!!!!!",
            "color": 3447003,
            "hoist": true,
            "position": 1,
            "permissions": "66321471",
            "managed": false,
            "mentionable": false
        });

        let role: Role = crate::from_value(&raw).unwrap();
        assert_eq!(role.permissions.0, 66321471);
        assert_eq!(serde_json::to_value(&role).unwrap(), raw);
    }
}
