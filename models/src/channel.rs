use std::fmt::{Display, Formatter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::{Error, ModelError, Result};
use crate::guild::{GuildId, GuildMember};
use crate::user::User;
use crate::validation;
use crate::wire::{
    decode_elements, decode_nullable, decode_optional, decode_tolerant, from_serde, require_bool,
    require_u64, DecodeContext, DecodeWarning, WireResource,
};
use crate::{parse_timestamp, Permissions, Snowflake};

/// Represents a channel ID.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct ChannelId(pub Snowflake);

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl WireResource for ChannelId {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        Ok(Self(Snowflake::from_raw(raw, ctx)?))
    }
}

/// Represent every kind of channel.
///
/// The code space is not contiguous; codes 6 to 9 were retired upstream.
/// An undocumented code decodes to [`ChannelKind::Unknown`] so that newly
/// introduced kinds do not fail the whole payload.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ChannelKind {
    GuildText,
    Dm,
    GuildVoice,
    GroupDm,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    GuildMedia,
    /// Forward-compatibility escape value carrying the raw code
    Unknown(u64),
}

impl ChannelKind {
    pub fn code(&self) -> u64 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildAnnouncement => 5,
            Self::AnnouncementThread => 10,
            Self::PublicThread => 11,
            Self::PrivateThread => 12,
            Self::GuildStageVoice => 13,
            Self::GuildDirectory => 14,
            Self::GuildForum => 15,
            Self::GuildMedia => 16,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            16 => Self::GuildMedia,
            other => Self::Unknown(other),
        }
    }

    /// Whether this kind is one of the three thread kinds
    pub fn is_thread(&self) -> bool {
        matches!(self, Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread)
    }
}

impl Serialize for ChannelKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for ChannelKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

impl WireResource for ChannelKind {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let code = match raw.as_u64() {
            Some(code) => code,
            None => return Err(Error::Model(ModelError::InvalidPayload("Failed to parse channel kind".into())))
        };

        let kind = Self::from_code(code);
        if let Self::Unknown(code) = &kind {
            ctx.warn(DecodeWarning::UnknownEnumCode {
                enumeration: "channel kind".into(),
                code: code.to_string(),
            });
        }
        Ok(kind)
    }
}

/// Represent the flags of a channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct ChannelFlags(pub u64);

/// Contain every channel flag possible
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-flags)
#[allow(dead_code)]
pub mod channel_flags {
    /// This thread is pinned to the top of its parent forum or media channel
    pub const PINNED: u64 = 1 << 1;
    /// A tag is required when creating a thread in this forum or media channel
    pub const REQUIRE_TAG: u64 = 1 << 4;
    /// Hides the embedded media download options, media channels only
    pub const HIDE_MEDIA_DOWNLOAD_OPTIONS: u64 = 1 << 15;
}

impl ChannelFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine multiple flags
    pub fn combine(bits: &[u64]) -> Self {
        let mut flags = Self::default();
        flags.add_flags(bits);
        flags
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

/// Represent the camera video quality mode of a voice channel
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-video-quality-modes)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum VideoQualityMode {
    Auto,
    Full,
    Unknown(u64),
}

impl VideoQualityMode {
    pub fn code(&self) -> u64 {
        match self {
            Self::Auto => 1,
            Self::Full => 2,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Auto,
            2 => Self::Full,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for VideoQualityMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for VideoQualityMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represent the default sort order of a forum or media channel
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-sort-order-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum SortOrderType {
    LatestActivity,
    CreationDate,
    Unknown(u64),
}

impl SortOrderType {
    pub fn code(&self) -> u64 {
        match self {
            Self::LatestActivity => 0,
            Self::CreationDate => 1,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::LatestActivity,
            1 => Self::CreationDate,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for SortOrderType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for SortOrderType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represent the default layout of a forum channel
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-forum-layout-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ForumLayoutType {
    NotSet,
    ListView,
    GalleryView,
    Unknown(u64),
}

impl ForumLayoutType {
    pub fn code(&self) -> u64 {
        match self {
            Self::NotSet => 0,
            Self::ListView => 1,
            Self::GalleryView => 2,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::NotSet,
            1 => Self::ListView,
            2 => Self::GalleryView,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for ForumLayoutType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for ForumLayoutType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represents a permission overwrite.
///
/// The `allow` and `deny` bit sets travel as decimal strings, see
/// [`Permissions`].
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#overwrite-object-overwrite-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Overwrite {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: OverwriteType,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl WireResource for Overwrite {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| crate::wire::missing("overwrite", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let kind = raw.get("type")
            .ok_or_else(|| crate::wire::missing("overwrite", "type"))
            .and_then(|kind| OverwriteType::from_raw(kind, ctx))?;
        let allow = raw.get("allow")
            .ok_or_else(|| crate::wire::missing("overwrite", "allow"))
            .and_then(|allow| Permissions::from_raw(allow, ctx))?;
        let deny = raw.get("deny")
            .ok_or_else(|| crate::wire::missing("overwrite", "deny"))
            .and_then(|deny| Permissions::from_raw(deny, ctx))?;

        Ok(Self { id, kind, allow, deny })
    }
}

/// Whether an overwrite targets a role or a member
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum OverwriteType {
    Role,
    Member,
    Unknown(u64),
}

impl OverwriteType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Role => 0,
            Self::Member => 1,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Role,
            1 => Self::Member,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for OverwriteType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for OverwriteType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

impl WireResource for OverwriteType {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        match raw.as_u64() {
            Some(code) => Ok(Self::from_code(code)),
            None => Err(Error::Model(ModelError::InvalidPayload("Failed to parse overwrite type".into())))
        }
    }
}

/// Represents a tag usable in a forum or media channel.
///
/// `emoji_id` and `emoji_name` are each optional and nullable; at most one
/// of them should carry a value (custom emoji against unicode emoji). Both
/// carrying a value is reported as an advisory finding, never as a decode
/// failure.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#forum-tag-object-forum-tag-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ForumTag {
    pub id: Snowflake,
    /// The name of the tag (0-20 characters)
    pub name: String,
    /// Whether only members with the MANAGE_THREADS permission can manage
    /// this tag
    pub moderated: bool,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub emoji_id: Option<Option<Snowflake>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<Option<String>>,
}

impl WireResource for ForumTag {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| crate::wire::missing("forum tag", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let name = crate::wire::require_str(raw, "forum tag", "name")?.to_owned();
        let moderated = require_bool(raw, "forum tag", "moderated")?;
        let emoji_id = decode_nullable(raw, "emoji_id", |id| Snowflake::from_raw(id, ctx))?;
        let emoji_name = decode_nullable(raw, "emoji_name", |name| {
            name.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("forum tag", "emoji_name"))
        })?;

        let tag = Self { id, name, moderated, emoji_id, emoji_name };
        validation::check_emoji_exclusivity("forum tag", &tag.emoji_id, &tag.emoji_name, ctx)?;

        Ok(tag)
    }
}

/// Represents the emoji shown in the add-reaction button of a forum or
/// media channel.
///
/// Carries the same emoji exclusivity rule as [`ForumTag`].
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#default-reaction-object-default-reaction-structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct DefaultReaction {
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub emoji_id: Option<Option<Snowflake>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<Option<String>>,
}

impl WireResource for DefaultReaction {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let emoji_id = decode_nullable(raw, "emoji_id", |id| Snowflake::from_raw(id, ctx))?;
        let emoji_name = decode_nullable(raw, "emoji_name", |name| {
            name.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("default reaction", "emoji_name"))
        })?;

        let reaction = Self { emoji_id, emoji_name };
        validation::check_emoji_exclusivity("default reaction", &reaction.emoji_id, &reaction.emoji_name, ctx)?;

        Ok(reaction)
    }
}

/// Represents a thread metadata.
///
/// Only attached to a channel when its kind is one of the thread kinds.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#thread-metadata-object-thread-metadata-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ThreadMetadata {
    pub archived: bool,
    /// The thread stops showing in the channel list after this many minutes
    /// of inactivity
    pub auto_archive_duration: u64,
    /// When the archive status was last changed
    pub archive_timestamp: DateTime<Utc>,
    pub locked: bool,
    /// Whether non-moderators can add other non-moderators, private threads
    /// only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitable: Option<bool>,
    /// Only populated for threads created after 2022-01-09
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<Option<DateTime<Utc>>>,
}

impl WireResource for ThreadMetadata {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        let archived = require_bool(raw, "thread metadata", "archived")?;
        let auto_archive_duration = require_u64(raw, "thread metadata", "auto_archive_duration")?;
        let archive_timestamp = raw.get("archive_timestamp")
            .ok_or_else(|| crate::wire::missing("thread metadata", "archive_timestamp"))
            .and_then(|ts| parse_timestamp("thread metadata", "archive_timestamp", ts))?;
        let locked = require_bool(raw, "thread metadata", "locked")?;
        let invitable = raw.get("invitable").and_then(Value::as_bool);
        let create_timestamp = decode_nullable(raw, "create_timestamp", |ts| {
            parse_timestamp("thread metadata", "create_timestamp", ts)
        })?;

        Ok(Self { archived, auto_archive_duration, archive_timestamp, locked, invitable, create_timestamp })
    }
}

/// Represents the membership of a user in a thread.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#thread-member-object-thread-member-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ThreadMember {
    /// ID of the thread, only included on certain API endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Snowflake>,
    /// Time the user last joined the thread
    pub join_timestamp: DateTime<Utc>,
    /// User-thread settings, currently only used for notifications
    pub flags: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
}

impl WireResource for ThreadMember {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = decode_optional(raw, "id", |id| ChannelId::from_raw(id, ctx))?;
        let user_id = decode_optional(raw, "user_id", |id| Snowflake::from_raw(id, ctx))?;
        let join_timestamp = raw.get("join_timestamp")
            .ok_or_else(|| crate::wire::missing("thread member", "join_timestamp"))
            .and_then(|ts| parse_timestamp("thread member", "join_timestamp", ts))?;
        let flags = require_u64(raw, "thread member", "flags")?;
        let member = decode_tolerant(raw, "thread member", "member", ctx, |member, _| from_serde(member, "guild member"));

        Ok(Self { id, user_id, join_timestamp, flags, member })
    }
}

/// Represents the webhook created by following an announcement channel.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#followed-channel-object-followed-channel-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FollowedChannel {
    /// The source channel id
    pub channel_id: ChannelId,
    /// The created target webhook id
    pub webhook_id: Snowflake,
}

impl WireResource for FollowedChannel {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let channel_id = raw.get("channel_id")
            .ok_or_else(|| crate::wire::missing("followed channel", "channel_id"))
            .and_then(|id| ChannelId::from_raw(id, ctx))?;
        let webhook_id = raw.get("webhook_id")
            .ok_or_else(|| crate::wire::missing("followed channel", "webhook_id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;

        Ok(Self { channel_id, webhook_id })
    }
}

/// Represents a channel of any kind.
///
/// The wire format does not tie field presence to the channel kind, so a
/// single structure carries the whole optional surface; which fields are
/// meaningful for a given kind is described by
/// [`validation::channel_applicable_fields`] and checked (advisory only) in
/// strict mode.
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    /// May be missing for some channel objects received over gateway guild
    /// dispatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_overwrites: Option<Vec<Overwrite>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub topic: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// The id of the last message sent in this channel (may not point to an
    /// existing or valid message)
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<Option<Snowflake>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u64>,
    /// Amount of seconds a user has to wait before sending another message
    /// (0-21600)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u64>,
    /// The recipients of the DM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<User>>,
    /// Icon hash of the group DM
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    /// ID of the creator of the group DM or thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    /// Application id of the group DM creator if it is bot-created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    /// Whether the group DM is managed by an application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,
    /// For guild channels the parent category, for threads the parent text
    /// channel
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<ChannelId>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub last_pin_timestamp: Option<Option<DateTime<Utc>>>,
    /// Voice region id, automatic when null
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub rtc_region: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_quality_mode: Option<VideoQualityMode>,
    /// Number of messages in a thread, not counting the initial message or
    /// deleted messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    /// Approximate count of users in a thread, stops counting at 50
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_metadata: Option<ThreadMetadata>,
    /// Thread member object for the current user, only included on certain
    /// API endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<ThreadMember>,
    /// Default duration copied onto newly created threads, in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auto_archive_duration: Option<u64>,
    /// Computed permissions for the invoking user, only included in
    /// interaction resolved data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<ChannelFlags>,
    /// Number of messages ever sent in a thread, does not decrement on
    /// deletion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_message_sent: Option<u64>,
    /// The tags that can be used in a forum or media channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_tags: Option<Vec<ForumTag>>,
    /// The tags applied to a thread in a forum or media channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_tags: Option<Vec<Snowflake>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub default_reaction_emoji: Option<Option<DefaultReaction>>,
    /// Initial rate_limit_per_user copied onto newly created threads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thread_rate_limit_per_user: Option<u64>,
    /// Null when no preferred sort order has been set by a channel admin
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub default_sort_order: Option<Option<SortOrderType>>,
    /// Zero when no layout view has been set by a channel admin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_forum_layout: Option<ForumLayoutType>,
}

impl WireResource for Channel {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| crate::wire::missing("channel", "id"))
            .and_then(|id| ChannelId::from_raw(id, ctx))?;
        let kind = raw.get("type")
            .ok_or_else(|| crate::wire::missing("channel", "type"))
            .and_then(|kind| ChannelKind::from_raw(kind, ctx))?;

        if ctx.options.strict {
            validation::check_channel_kind(raw, &kind, ctx);
        }

        let guild_id = decode_optional(raw, "guild_id", |id| GuildId::from_raw(id, ctx))?;
        let position = raw.get("position").and_then(Value::as_u64);
        let permission_overwrites = raw.get("permission_overwrites")
            .map(|_| decode_elements(raw, "channel", "permission_overwrites", ctx));
        let name = decode_nullable(raw, "name", |name| {
            name.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("channel", "name"))
        })?;
        let topic = decode_nullable(raw, "topic", |topic| {
            topic.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("channel", "topic"))
        })?;
        let nsfw = raw.get("nsfw").and_then(Value::as_bool);
        let last_message_id = decode_nullable(raw, "last_message_id", |id| Snowflake::from_raw(id, ctx))?;
        let bitrate = raw.get("bitrate").and_then(Value::as_u64);
        let user_limit = raw.get("user_limit").and_then(Value::as_u64);
        let rate_limit_per_user = raw.get("rate_limit_per_user").and_then(Value::as_u64);
        let recipients = raw.get("recipients").map(|_| decode_elements(raw, "channel", "recipients", ctx));
        let icon = decode_nullable(raw, "icon", |icon| {
            icon.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("channel", "icon"))
        })?;
        let owner_id = decode_optional(raw, "owner_id", |id| Snowflake::from_raw(id, ctx))?;
        let application_id = decode_optional(raw, "application_id", |id| Snowflake::from_raw(id, ctx))?;
        let managed = raw.get("managed").and_then(Value::as_bool);
        let parent_id = decode_nullable(raw, "parent_id", |id| ChannelId::from_raw(id, ctx))?;
        let last_pin_timestamp = decode_nullable(raw, "last_pin_timestamp", |ts| {
            parse_timestamp("channel", "last_pin_timestamp", ts)
        })?;
        let rtc_region = decode_nullable(raw, "rtc_region", |region| {
            region.as_str().map(str::to_owned).ok_or_else(|| crate::wire::mismatch("channel", "rtc_region"))
        })?;
        let video_quality_mode = raw.get("video_quality_mode")
            .and_then(Value::as_u64)
            .map(VideoQualityMode::from_code);
        let message_count = raw.get("message_count").and_then(Value::as_u64);
        let member_count = raw.get("member_count").and_then(Value::as_u64);
        let thread_metadata = decode_tolerant(raw, "channel", "thread_metadata", ctx, ThreadMetadata::from_raw);
        let member = decode_tolerant(raw, "channel", "member", ctx, ThreadMember::from_raw);
        let default_auto_archive_duration = raw.get("default_auto_archive_duration").and_then(Value::as_u64);
        let permissions = decode_optional(raw, "permissions", |permissions| {
            Permissions::from_raw(permissions, ctx)
        })?;
        let flags = raw.get("flags").and_then(Value::as_u64).map(ChannelFlags);
        let total_message_sent = raw.get("total_message_sent").and_then(Value::as_u64);
        let available_tags = raw.get("available_tags").map(|_| decode_elements(raw, "channel", "available_tags", ctx));
        let applied_tags = raw.get("applied_tags").map(|_| decode_elements(raw, "channel", "applied_tags", ctx));
        let default_reaction_emoji = decode_nullable(raw, "default_reaction_emoji", |emoji| {
            DefaultReaction::from_raw(emoji, ctx)
        })?;
        let default_thread_rate_limit_per_user = raw.get("default_thread_rate_limit_per_user").and_then(Value::as_u64);
        let default_sort_order = decode_nullable(raw, "default_sort_order", |order| {
            order.as_u64()
                .map(SortOrderType::from_code)
                .ok_or_else(|| crate::wire::mismatch("channel", "default_sort_order"))
        })?;
        let default_forum_layout = raw.get("default_forum_layout")
            .and_then(Value::as_u64)
            .map(ForumLayoutType::from_code);

        Ok(Self {
            id,
            kind,
            guild_id,
            position,
            permission_overwrites,
            name,
            topic,
            nsfw,
            last_message_id,
            bitrate,
            user_limit,
            rate_limit_per_user,
            recipients,
            icon,
            owner_id,
            application_id,
            managed,
            parent_id,
            last_pin_timestamp,
            rtc_region,
            video_quality_mode,
            message_count,
            member_count,
            thread_metadata,
            member,
            default_auto_archive_duration,
            permissions,
            flags,
            total_message_sent,
            available_tags,
            applied_tags,
            default_reaction_emoji,
            default_thread_rate_limit_per_user,
            default_sort_order,
            default_forum_layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use crate::wire::{DecodeContext, DecodeOptions, DecodeWarning};
    use super::*;

    fn lenient() -> DecodeContext {
        DecodeContext::new(DecodeOptions::default())
    }

    #[test]
    fn every_documented_kind_decodes_to_its_constant() {
        let documented = [
            (0, ChannelKind::GuildText),
            (1, ChannelKind::Dm),
            (2, ChannelKind::GuildVoice),
            (3, ChannelKind::GroupDm),
            (4, ChannelKind::GuildCategory),
            (5, ChannelKind::GuildAnnouncement),
            (10, ChannelKind::AnnouncementThread),
            (11, ChannelKind::PublicThread),
            (12, ChannelKind::PrivateThread),
            (13, ChannelKind::GuildStageVoice),
            (14, ChannelKind::GuildDirectory),
            (15, ChannelKind::GuildForum),
            (16, ChannelKind::GuildMedia),
        ];

        for (code, kind) in documented {
            assert_eq!(ChannelKind::from_code(code), kind);
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn undocumented_kind_is_preserved_not_rejected() {
        let mut ctx = lenient();
        let kind = ChannelKind::from_raw(&json!(42), &mut ctx).unwrap();

        assert_eq!(kind, ChannelKind::Unknown(42));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!(42));
        assert_eq!(ctx.warnings().len(), 1);
    }

    #[test]
    fn channel_flag_algebra() {
        let flags = ChannelFlags::combine(&[channel_flags::PINNED, channel_flags::REQUIRE_TAG]);
        assert!(flags.has(channel_flags::PINNED));
        assert!(flags.has(channel_flags::REQUIRE_TAG));
        assert!(!flags.has(channel_flags::HIDE_MEDIA_DOWNLOAD_OPTIONS));
        assert!(!flags.without(channel_flags::PINNED).has(channel_flags::PINNED));
    }

    #[test]
    fn channel_requires_id_and_kind() {
        let mut ctx = lenient();
        let err = Channel::from_raw(&json!({ "type": 0 }), &mut ctx).unwrap_err();
        assert!(err.to_string().contains("Field 'id' is missing for the channel"));

        let mut ctx = lenient();
        let err = Channel::from_raw(&json!({ "id": "123" }), &mut ctx).unwrap_err();
        assert!(err.to_string().contains("Field 'type' is missing for the channel"));
    }

    #[test]
    fn tri_state_fields_round_trip() {
        let raw = json!({
            "id": "41771983423143937",
            "type": 0,
            "guild_id": "41771983423143937",
            "name": "general",
            "topic": null,
            "position": 6,
            "nsfw": true,
            "rate_limit_per_user": 2
        });

        let channel: Channel = crate::from_value(&raw).unwrap();
        // name carries a value, topic is explicitly null, icon is absent
        assert_eq!(channel.name, Some(Some("general".to_string())));
        assert_eq!(channel.topic, Some(None));
        assert_eq!(channel.icon, None);

        assert_eq!(serde_json::to_value(&channel).unwrap(), raw);
    }

    #[test]
    fn serde_and_raw_decoders_agree() {
        let raw = json!({
            "id": "41771983423143937",
            "type": 11,
            "guild_id": "41771983423143937",
            "parent_id": "41771983423143937",
            "name": "don't buy dota-2",
            "last_message_id": "155117677105512449",
            "message_count": 1,
            "member_count": 5,
            "thread_metadata": {
                "archived": false,
                "auto_archive_duration": 1440,
                "archive_timestamp": "2021-04-12T23:40:39.855793+00:00",
                "locked": false
            },
            "total_message_sent": 1
        });

        let mut ctx = lenient();
        let from_raw = Channel::from_raw(&raw, &mut ctx).unwrap();
        let from_serde: Channel = crate::from_value(&raw).unwrap();

        assert_eq!(from_raw, from_serde);
        assert!(from_raw.kind.is_thread());
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn forum_tag_with_both_emoji_fields_warns() {
        let mut ctx = lenient();
        let tag = ForumTag::from_raw(
            &json!({ "id": "1", "name": "help", "moderated": false, "emoji_id": "2", "emoji_name": "🔥" }),
            &mut ctx,
        ).unwrap();

        assert_eq!(tag.emoji_id, Some(Some("2".into())));
        assert!(matches!(ctx.warnings()[0], DecodeWarning::EmojiExclusivity { .. }));
    }

    #[test]
    fn forum_tag_with_no_emoji_does_not_warn() {
        let mut ctx = lenient();
        ForumTag::from_raw(
            &json!({ "id": "1", "name": "help", "moderated": false, "emoji_id": null, "emoji_name": null }),
            &mut ctx,
        ).unwrap();

        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn followed_channel_names_its_missing_fields() {
        let mut ctx = lenient();
        let followed = FollowedChannel::from_raw(
            &json!({ "channel_id": "41771983423143937", "webhook_id": "41771983423143938" }),
            &mut ctx,
        ).unwrap();
        assert_eq!(followed.channel_id, ChannelId::from("41771983423143937"));

        let err = FollowedChannel::from_raw(&json!({ "channel_id": "1" }), &mut ctx).unwrap_err();
        assert!(err.to_string().contains("Field 'webhook_id' is missing for the followed channel"));
    }

    #[test]
    fn malformed_overwrite_is_skipped_with_a_warning() {
        let raw = json!({
            "id": "123",
            "type": 0,
            "permission_overwrites": [
                { "id": "1", "type": 0, "allow": "2048", "deny": "0" },
                { "id": "2", "type": 0 }
            ]
        });

        let mut ctx = lenient();
        let channel = Channel::from_raw(&raw, &mut ctx).unwrap();

        assert_eq!(channel.permission_overwrites.as_ref().unwrap().len(), 1);
        assert!(matches!(ctx.warnings()[0], DecodeWarning::SkippedElement { .. }));
    }
}
