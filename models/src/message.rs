use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::{Error, ModelError, Result};
use crate::channel::{Channel, ChannelId, ChannelKind};
use crate::components::embed::Embed;
use crate::components::message_components::ActionRow;
use crate::components::poll::Poll;
use crate::components::sticker::{Sticker, StickerFormatType};
use crate::components::Emoji;
use crate::guild::{GuildId, GuildMember};
use crate::interaction::{
    ApplicationIntegrationType, InteractionType, MessageInteraction, ResolvedData,
};
use crate::user::{Application, User};
use crate::validation;
use crate::wire::{
    decode_elements, decode_nullable, decode_optional, decode_tolerant, from_serde, missing,
    require_bool, require_u64, DecodeContext, DecodeWarning, WireResource,
};
use crate::{parse_timestamp, Snowflake};

/// Represents a message in a channel
///
/// Every field beyond the identifier spine is optional; which of them are
/// meaningful for a given kind is described by
/// [`validation::message_applicable_fields`] and checked (advisory only) in
/// strict mode.
///
/// Reference:
/// - [Message Structure](https://discord.com/developers/docs/resources/channel#message-object-message-structure)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: ChannelId,
    pub author: User,
    #[serde(default)]
    pub content: String,
    /// When this message was sent
    pub timestamp: DateTime<Utc>,
    /// When this message was edited, or null if never
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tts: bool,
    /// Whether this message mentions everyone
    #[serde(default)]
    pub mention_everyone: bool,
    /// Users specifically mentioned in the message
    #[serde(default)]
    pub mentions: Vec<User>,
    /// Roles specifically mentioned in this message
    #[serde(default)]
    pub mention_roles: Vec<Snowflake>,
    /// Channels specifically mentioned in this message.
    ///
    /// Not all channel mentions in a message will appear in
    /// mention_channels. Only textual channels that are visible to everyone
    /// in a lurkable guild will ever be included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention_channels: Option<Vec<ChannelMention>>,
    /// Any attached files
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
    /// Used for validating that a message was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Nonce>,
    #[serde(default)]
    pub pinned: bool,
    /// If the message is generated by a webhook, this is the webhook's id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<Snowflake>,
    /// The type of message
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// Sent with Rich Presence-related chat embeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<MessageActivity>,
    /// Sent with Rich Presence-related chat embeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    /// If the message is an interaction response or an application-owned
    /// webhook, the id of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    /// Contain message flags ORd together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    /// Data showing the source of a crosspost, channel follow add, pin or
    /// reply message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    /// The forwarded snapshots associated with the message reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_snapshots: Option<Vec<MessageSnapshot>>,
    /// The message associated with the message reference.
    ///
    /// Absent when the message is not a reply, null when the replied-to
    /// message was deleted. Decoding truncates the chain at the configured
    /// reference depth.
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub referenced_message: Option<Option<Box<Message>>>,
    /// Sent if the message is a result of an interaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_metadata: Option<Box<MessageInteractionMetadata>>,
    /// Superseded upstream by `interaction_metadata` but still sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<MessageInteraction>,
    /// The thread that was started from this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Box<Channel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_items: Option<Vec<StickerItem>>,
    /// Superseded upstream by `sticker_items` but still sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Vec<Sticker>>,
    /// A generally increasing integer (there may be gaps or duplicates)
    /// that represents the approximate position of the message in a thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_subscription_data: Option<RoleSubscriptionData>,
    /// Data for the users, members, channels and roles in the message's
    /// auto-populated select menus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    /// The call associated with the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<MessageCall>,
}

impl WireResource for Message {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| missing("message", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let channel_id = raw.get("channel_id")
            .ok_or_else(|| missing("message", "channel_id"))
            .and_then(|id| ChannelId::from_raw(id, ctx))?;
        let author = raw.get("author")
            .ok_or_else(|| missing("message", "author"))
            .and_then(|author| User::from_raw(author, ctx))?;
        let kind = raw.get("type")
            .ok_or_else(|| missing("message", "type"))
            .and_then(|kind| MessageType::from_raw(kind, ctx))?;
        let timestamp = raw.get("timestamp")
            .ok_or_else(|| missing("message", "timestamp"))
            .and_then(|ts| parse_timestamp("message", "timestamp", ts))?;

        if ctx.options.strict {
            validation::check_message_kind(raw, &kind, ctx);
        }

        let content = raw["content"].as_str().unwrap_or_default().to_owned();
        let edited_timestamp = decode_optional(raw, "edited_timestamp", |ts| {
            parse_timestamp("message", "edited_timestamp", ts)
        })?;
        let tts = raw["tts"].as_bool().unwrap_or(false);
        let mention_everyone = raw["mention_everyone"].as_bool().unwrap_or(false);
        let mentions = decode_elements(raw, "message", "mentions", ctx);
        let mention_roles = decode_elements(raw, "message", "mention_roles", ctx);
        let mention_channels = raw.get("mention_channels")
            .map(|_| decode_elements(raw, "message", "mention_channels", ctx));
        let attachments = decode_elements(raw, "message", "attachments", ctx);
        let embeds = decode_elements(raw, "message", "embeds", ctx);
        let reactions = raw.get("reactions").map(|_| decode_elements(raw, "message", "reactions", ctx));
        let nonce = match raw.get("nonce") {
            Some(Value::Number(number)) => number.as_i64().map(Nonce::Integer),
            Some(Value::String(text)) => Some(Nonce::Text(text.clone())),
            _ => None,
        };
        let pinned = raw["pinned"].as_bool().unwrap_or(false);
        let webhook_id = decode_optional(raw, "webhook_id", |id| Snowflake::from_raw(id, ctx))?;
        let activity = decode_tolerant(raw, "message", "activity", ctx, MessageActivity::from_raw);
        let application = decode_tolerant(raw, "message", "application", ctx, Application::from_raw);
        let application_id = decode_optional(raw, "application_id", |id| Snowflake::from_raw(id, ctx))?;
        let flags = raw.get("flags").and_then(Value::as_u64).map(MessageFlags);
        let message_reference = decode_tolerant(raw, "message", "message_reference", ctx, MessageReference::from_raw);
        let message_snapshots = raw.get("message_snapshots")
            .map(|_| decode_elements(raw, "message", "message_snapshots", ctx));

        // The protocol does not guarantee the reference chain terminates, so
        // nesting beyond the configured depth is truncated with a marker
        // instead of being followed.
        let referenced_message = match raw.get("referenced_message") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => {
                if ctx.reference_allowed() {
                    ctx.enter_reference();
                    let nested = Message::from_raw(value, ctx);
                    ctx.leave_reference();

                    match nested {
                        Ok(message) => Some(Some(Box::new(message))),
                        Err(err) => {
                            ctx.warn(DecodeWarning::SkippedElement {
                                resource: "message".to_string(),
                                field: "referenced_message".to_string(),
                                reason: err.to_string(),
                            });
                            None
                        }
                    }
                } else {
                    ctx.warn(DecodeWarning::ReferenceDepthExceeded { resource: "message".to_string() });
                    None
                }
            }
        };

        let interaction_metadata = decode_tolerant(raw, "message", "interaction_metadata", ctx, MessageInteractionMetadata::from_raw)
            .map(Box::new);
        let interaction = decode_tolerant(raw, "message", "interaction", ctx, MessageInteraction::from_raw);
        let thread = decode_tolerant(raw, "message", "thread", ctx, Channel::from_raw).map(Box::new);
        let components = raw.get("components").map(|_| decode_elements(raw, "message", "components", ctx));
        let sticker_items = raw.get("sticker_items").map(|_| decode_elements(raw, "message", "sticker_items", ctx));
        let stickers = raw.get("stickers").map(|_| decode_elements(raw, "message", "stickers", ctx));
        let position = raw["position"].as_u64();
        let role_subscription_data = decode_tolerant(raw, "message", "role_subscription_data", ctx, RoleSubscriptionData::from_raw);
        let resolved = decode_tolerant(raw, "message", "resolved", ctx, ResolvedSelection::from_raw);
        let poll = decode_tolerant(raw, "message", "poll", ctx, Poll::from_raw);
        let call = decode_tolerant(raw, "message", "call", ctx, MessageCall::from_raw);

        Ok(Self {
            id,
            channel_id,
            author,
            content,
            timestamp,
            edited_timestamp,
            tts,
            mention_everyone,
            mentions,
            mention_roles,
            mention_channels,
            attachments,
            embeds,
            reactions,
            nonce,
            pinned,
            webhook_id,
            kind,
            activity,
            application,
            application_id,
            flags,
            message_reference,
            message_snapshots,
            referenced_message,
            interaction_metadata,
            interaction,
            thread,
            components,
            sticker_items,
            stickers,
            position,
            role_subscription_data,
            resolved,
            poll,
            call,
        })
    }
}

/// Represents the type of a message
///
/// The code space is gapped: 13, 30, 33 to 35 and 40 to 43 are reserved or
/// retired upstream. An undocumented code decodes to
/// [`MessageType::Unknown`].
///
/// Reference:
/// - [Message Types](https://discord.com/developers/docs/resources/channel#message-object-message-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MessageType {
    Default,
    RecipientAdd,
    RecipientRemove,
    Call,
    ChannelNameChange,
    ChannelIconChange,
    ChannelPinnedMessage,
    UserJoin,
    GuildBoost,
    GuildBoostTier1,
    GuildBoostTier2,
    GuildBoostTier3,
    ChannelFollowAdd,
    GuildDiscoveryDisqualified,
    GuildDiscoveryRequalified,
    GuildDiscoveryGracePeriodInitialWarning,
    GuildDiscoveryGracePeriodFinalWarning,
    ThreadCreated,
    Reply,
    ChatInputCommand,
    ThreadStarterMessage,
    GuildInviteReminder,
    ContextMenuCommand,
    AutoModerationAction,
    RoleSubscriptionPurchase,
    InteractionPremiumUpsell,
    StageStart,
    StageEnd,
    StageSpeaker,
    StageTopic,
    GuildApplicationPremiumSubscription,
    GuildIncidentAlertModeEnabled,
    GuildIncidentAlertModeDisabled,
    GuildIncidentReportRaid,
    GuildIncidentReportFalseAlarm,
    PurchaseNotification,
    /// Forward-compatibility escape value carrying the raw code
    Unknown(u64),
}

impl MessageType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Default => 0,
            Self::RecipientAdd => 1,
            Self::RecipientRemove => 2,
            Self::Call => 3,
            Self::ChannelNameChange => 4,
            Self::ChannelIconChange => 5,
            Self::ChannelPinnedMessage => 6,
            Self::UserJoin => 7,
            Self::GuildBoost => 8,
            Self::GuildBoostTier1 => 9,
            Self::GuildBoostTier2 => 10,
            Self::GuildBoostTier3 => 11,
            Self::ChannelFollowAdd => 12,
            Self::GuildDiscoveryDisqualified => 14,
            Self::GuildDiscoveryRequalified => 15,
            Self::GuildDiscoveryGracePeriodInitialWarning => 16,
            Self::GuildDiscoveryGracePeriodFinalWarning => 17,
            Self::ThreadCreated => 18,
            Self::Reply => 19,
            Self::ChatInputCommand => 20,
            Self::ThreadStarterMessage => 21,
            Self::GuildInviteReminder => 22,
            Self::ContextMenuCommand => 23,
            Self::AutoModerationAction => 24,
            Self::RoleSubscriptionPurchase => 25,
            Self::InteractionPremiumUpsell => 26,
            Self::StageStart => 27,
            Self::StageEnd => 28,
            Self::StageSpeaker => 29,
            Self::StageTopic => 31,
            Self::GuildApplicationPremiumSubscription => 32,
            Self::GuildIncidentAlertModeEnabled => 36,
            Self::GuildIncidentAlertModeDisabled => 37,
            Self::GuildIncidentReportRaid => 38,
            Self::GuildIncidentReportFalseAlarm => 39,
            Self::PurchaseNotification => 44,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Default,
            1 => Self::RecipientAdd,
            2 => Self::RecipientRemove,
            3 => Self::Call,
            4 => Self::ChannelNameChange,
            5 => Self::ChannelIconChange,
            6 => Self::ChannelPinnedMessage,
            7 => Self::UserJoin,
            8 => Self::GuildBoost,
            9 => Self::GuildBoostTier1,
            10 => Self::GuildBoostTier2,
            11 => Self::GuildBoostTier3,
            12 => Self::ChannelFollowAdd,
            14 => Self::GuildDiscoveryDisqualified,
            15 => Self::GuildDiscoveryRequalified,
            16 => Self::GuildDiscoveryGracePeriodInitialWarning,
            17 => Self::GuildDiscoveryGracePeriodFinalWarning,
            18 => Self::ThreadCreated,
            19 => Self::Reply,
            20 => Self::ChatInputCommand,
            21 => Self::ThreadStarterMessage,
            22 => Self::GuildInviteReminder,
            23 => Self::ContextMenuCommand,
            24 => Self::AutoModerationAction,
            25 => Self::RoleSubscriptionPurchase,
            26 => Self::InteractionPremiumUpsell,
            27 => Self::StageStart,
            28 => Self::StageEnd,
            29 => Self::StageSpeaker,
            31 => Self::StageTopic,
            32 => Self::GuildApplicationPremiumSubscription,
            36 => Self::GuildIncidentAlertModeEnabled,
            37 => Self::GuildIncidentAlertModeDisabled,
            38 => Self::GuildIncidentReportRaid,
            39 => Self::GuildIncidentReportFalseAlarm,
            44 => Self::PurchaseNotification,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for MessageType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

impl WireResource for MessageType {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let code = match raw.as_u64() {
            Some(code) => code,
            None => return Err(Error::Model(ModelError::InvalidPayload("Failed to parse message type".into())))
        };

        let kind = Self::from_code(code);
        if let Self::Unknown(code) = &kind {
            ctx.warn(DecodeWarning::UnknownEnumCode {
                enumeration: "message type".into(),
                code: code.to_string(),
            });
        }
        Ok(kind)
    }
}

/// Used for validating that a message was sent, either as an integer or a
/// string
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum Nonce {
    Integer(i64),
    Text(String),
}

/// Represent the flags of a message
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct MessageFlags(pub u64);

/// Contain every message flags possible
///
/// Reference:
/// - [Message Flags](https://discord.com/developers/docs/resources/channel#message-object-message-flags)
#[allow(dead_code)]
pub mod message_flags {
    /// This message has been published to subscribed channels
    pub const CROSSPOSTED: u64 = 1 << 0;
    /// This message originated from a message in another channel
    pub const IS_CROSSPOST: u64 = 1 << 1;
    /// Do not include any embeds when serializing this message
    pub const SUPPRESS_EMBEDS: u64 = 1 << 2;
    /// The source message for this crosspost has been deleted
    pub const SOURCE_MESSAGE_DELETED: u64 = 1 << 3;
    /// This message came from the urgent message system
    pub const URGENT: u64 = 1 << 4;
    /// This message has an associated thread, with the same id as the message
    pub const HAS_THREAD: u64 = 1 << 5;
    /// This message is only visible to the user who invoked the interaction
    pub const EPHEMERAL: u64 = 1 << 6;
    /// This message is an interaction response and the bot is "thinking"
    pub const LOADING: u64 = 1 << 7;
    /// This message failed to mention some roles in the thread
    pub const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD: u64 = 1 << 8;
    /// This message will not trigger push and desktop notifications
    pub const SUPPRESS_NOTIFICATIONS: u64 = 1 << 12;
    /// This message is a voice message
    pub const IS_VOICE_MESSAGE: u64 = 1 << 13;
}

impl MessageFlags {
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

    /// Remove multiple flags
    pub fn remove_flags(&mut self, flags: &[u64]) {
        for &flag in flags {
            self.remove_flag(flag);
        }
    }
}

/// Represents a channel mention in a message
///
/// Reference:
/// - [Channel Mention Structure](https://discord.com/developers/docs/resources/channel#channel-mention-object-channel-mention-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ChannelMention {
    pub id: ChannelId,
    pub guild_id: GuildId,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub name: String,
}

impl WireResource for ChannelMention {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| missing("channel mention", "id"))
            .and_then(|id| ChannelId::from_raw(id, ctx))?;
        let guild_id = raw.get("guild_id")
            .ok_or_else(|| missing("channel mention", "guild_id"))
            .and_then(|id| GuildId::from_raw(id, ctx))?;
        let kind = raw.get("type")
            .ok_or_else(|| missing("channel mention", "type"))
            .and_then(|kind| ChannelKind::from_raw(kind, ctx))?;
        let name = crate::wire::require_str(raw, "channel mention", "name")?.to_owned();

        Ok(Self { id, guild_id, kind, name })
    }
}

/// Represent the flags of an attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct AttachmentFlags(pub u64);

/// Contain every attachment flag possible
///
/// Reference:
/// - [Attachment Flags](https://discord.com/developers/docs/resources/channel#attachment-object-attachment-flags)
#[allow(dead_code)]
pub mod attachment_flags {
    /// This attachment has been edited using the remix feature on mobile
    pub const IS_REMIX: u64 = 1 << 2;
}

impl AttachmentFlags {
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

/// Represents an attachment in a message
///
/// `height` and `width` are only meaningful for image and video content and
/// are then present but null when unknown, hence the tri-state.
///
/// Reference:
/// - [Attachment Structure](https://discord.com/developers/docs/resources/channel#attachment-object-attachment-structure)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: Snowflake,
    /// Name of file attached
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The media type of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Size of file in bytes
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub height: Option<Option<u64>>,
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub width: Option<Option<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
    /// The duration of the audio file, currently for voice messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Base64 encoded bytearray representing a sampled waveform, currently
    /// for voice messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<AttachmentFlags>,
}

impl WireResource for Attachment {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| missing("attachment", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let filename = crate::wire::require_str(raw, "attachment", "filename")?.to_owned();
        let title = raw["title"].as_str().map(str::to_owned);
        let description = raw["description"].as_str().map(str::to_owned);
        let content_type = raw["content_type"].as_str().map(str::to_owned);
        let size = require_u64(raw, "attachment", "size")?;
        let url = crate::wire::require_str(raw, "attachment", "url")?.to_owned();
        let proxy_url = crate::wire::require_str(raw, "attachment", "proxy_url")?.to_owned();
        let height = decode_nullable(raw, "height", |height| {
            height.as_u64().ok_or_else(|| crate::wire::mismatch("attachment", "height"))
        })?;
        let width = decode_nullable(raw, "width", |width| {
            width.as_u64().ok_or_else(|| crate::wire::mismatch("attachment", "width"))
        })?;
        let ephemeral = raw["ephemeral"].as_bool();
        let duration_secs = raw["duration_secs"].as_f64();
        let waveform = raw["waveform"].as_str().map(str::to_owned);
        let flags = raw.get("flags").and_then(Value::as_u64).map(AttachmentFlags);

        Ok(Self {
            id,
            filename,
            title,
            description,
            content_type,
            size,
            url,
            proxy_url,
            height,
            width,
            ephemeral,
            duration_secs,
            waveform,
            flags,
        })
    }
}

/// Represent the type of a message reference
///
/// Reference:
/// - [Message Reference Types](https://discord.com/developers/docs/resources/channel#message-reference-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum MessageReferenceType {
    /// A standard reference used by replies
    #[default]
    Default,
    /// Reference used to point to a message at a point in time
    Forward,
    Unknown(u64),
}

impl MessageReferenceType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Default => 0,
            Self::Forward => 1,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Default,
            1 => Self::Forward,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for MessageReferenceType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for MessageReferenceType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represents a reference to a message
///
/// Reference:
/// - [Message Reference Structure](https://discord.com/developers/docs/resources/channel#message-reference-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MessageReference {
    /// Absent on older payloads, which are always standard references
    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageReferenceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// When sending, whether to error if the referenced message does not
    /// exist instead of sending as a normal message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_if_not_exists: Option<bool>,
}

impl WireResource for MessageReference {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let kind = raw.get("type").and_then(Value::as_u64).map(MessageReferenceType::from_code);
        let message_id = decode_optional(raw, "message_id", |id| Snowflake::from_raw(id, ctx))?;
        let channel_id = decode_optional(raw, "channel_id", |id| ChannelId::from_raw(id, ctx))?;
        let guild_id = decode_optional(raw, "guild_id", |id| GuildId::from_raw(id, ctx))?;
        let fail_if_not_exists = raw["fail_if_not_exists"].as_bool();

        Ok(Self { kind, message_id, channel_id, guild_id, fail_if_not_exists })
    }
}

/// The reduced field set a forwarded message snapshot carries.
///
/// A deliberate projection of [`Message`]: a snapshot never transports the
/// author, reactions or interaction metadata of the forwarded message, and
/// the restriction is kept visible in the type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSnapshotFields {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub timestamp: DateTime<Utc>,
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mentions: Vec<User>,
    #[serde(default)]
    pub mention_roles: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl From<&Message> for MessageSnapshotFields {
    fn from(message: &Message) -> Self {
        Self {
            kind: message.kind.clone(),
            content: message.content.clone(),
            embeds: message.embeds.clone(),
            attachments: message.attachments.clone(),
            timestamp: message.timestamp,
            edited_timestamp: message.edited_timestamp,
            mentions: message.mentions.clone(),
            mention_roles: message.mention_roles.clone(),
            flags: message.flags.clone(),
        }
    }
}

impl WireResource for MessageSnapshotFields {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let kind = raw.get("type")
            .ok_or_else(|| missing("message snapshot", "type"))
            .and_then(|kind| MessageType::from_raw(kind, ctx))?;
        let timestamp = raw.get("timestamp")
            .ok_or_else(|| missing("message snapshot", "timestamp"))
            .and_then(|ts| parse_timestamp("message snapshot", "timestamp", ts))?;
        let content = raw["content"].as_str().unwrap_or_default().to_owned();
        let embeds = decode_elements(raw, "message snapshot", "embeds", ctx);
        let attachments = decode_elements(raw, "message snapshot", "attachments", ctx);
        let edited_timestamp = decode_optional(raw, "edited_timestamp", |ts| {
            parse_timestamp("message snapshot", "edited_timestamp", ts)
        })?;
        let mentions = decode_elements(raw, "message snapshot", "mentions", ctx);
        let mention_roles = decode_elements(raw, "message snapshot", "mention_roles", ctx);
        let flags = raw.get("flags").and_then(Value::as_u64).map(MessageFlags);

        Ok(Self { kind, content, embeds, attachments, timestamp, edited_timestamp, mentions, mention_roles, flags })
    }
}

/// Represents a forwarded message snapshot
///
/// Reference:
/// - [Message Snapshot Structure](https://discord.com/developers/docs/resources/channel#message-snapshot-structure)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSnapshot {
    pub message: MessageSnapshotFields,
}

impl WireResource for MessageSnapshot {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let message = raw.get("message")
            .ok_or_else(|| missing("message snapshot", "message"))
            .and_then(|message| MessageSnapshotFields::from_raw(message, ctx))?;

        Ok(Self { message })
    }
}

/// Represent the type of a message activity
///
/// Reference:
/// - [Message Activity Types](https://discord.com/developers/docs/resources/channel#message-object-message-activity-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MessageActivityType {
    Join,
    Spectate,
    Listen,
    JoinRequest,
    Unknown(u64),
}

impl MessageActivityType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Join => 1,
            Self::Spectate => 2,
            Self::Listen => 3,
            Self::JoinRequest => 5,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Join,
            2 => Self::Spectate,
            3 => Self::Listen,
            5 => Self::JoinRequest,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for MessageActivityType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for MessageActivityType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Sent with Rich Presence-related chat embeds
///
/// Reference:
/// - [Message Activity Structure](https://discord.com/developers/docs/resources/channel#message-object-message-activity-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MessageActivity {
    #[serde(rename = "type")]
    pub kind: MessageActivityType,
    /// party_id from a Rich Presence event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
}

impl WireResource for MessageActivity {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        let kind = raw.get("type")
            .ok_or_else(|| missing("message activity", "type"))
            .and_then(|kind| kind.as_u64().ok_or_else(|| crate::wire::mismatch("message activity", "type")))
            .map(MessageActivityType::from_code)?;
        let party_id = raw["party_id"].as_str().map(str::to_owned);

        Ok(Self { kind, party_id })
    }
}

/// Represents the call attached to a call system message
///
/// Reference:
/// - [Message Call Structure](https://discord.com/developers/docs/resources/channel#message-call-object-message-call-object-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MessageCall {
    /// The users that participated in the call
    pub participants: Vec<Snowflake>,
    /// Null while the call is ongoing
    #[serde(default, deserialize_with = "crate::wire::double_option", skip_serializing_if = "Option::is_none")]
    pub ended_timestamp: Option<Option<DateTime<Utc>>>,
}

impl WireResource for MessageCall {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        if raw.get("participants").and_then(Value::as_array).is_none() {
            return Err(missing("message call", "participants"));
        }
        let participants = decode_elements(raw, "message call", "participants", ctx);
        let ended_timestamp = decode_nullable(raw, "ended_timestamp", |ts| {
            parse_timestamp("message call", "ended_timestamp", ts)
        })?;

        Ok(Self { participants, ended_timestamp })
    }
}

/// Represents a role subscription purchase or renewal
///
/// Reference:
/// - [Role Subscription Structure](https://discord.com/developers/docs/resources/channel#role-subscription-data-object)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoleSubscriptionData {
    /// The id of the sku and listing that the user is subscribed to
    pub role_subscription_listing_id: Snowflake,
    /// The name of the tier that the user is subscribed to
    pub tier_name: String,
    /// The cumulative number of months that the user has been subscribed for
    pub total_months_subscribed: u64,
    /// Whether this notification is for a renewal rather than a new purchase
    pub is_renewal: bool,
}

impl WireResource for RoleSubscriptionData {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let role_subscription_listing_id = raw.get("role_subscription_listing_id")
            .ok_or_else(|| missing("role subscription data", "role_subscription_listing_id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let tier_name = crate::wire::require_str(raw, "role subscription data", "tier_name")?.to_owned();
        let total_months_subscribed = require_u64(raw, "role subscription data", "total_months_subscribed")?;
        let is_renewal = require_bool(raw, "role subscription data", "is_renewal")?;

        Ok(Self { role_subscription_listing_id, tier_name, total_months_subscribed, is_renewal })
    }
}

/// The emoji fields carried by a reaction.
///
/// A deliberate projection of [`Emoji`]: a reaction only transports
/// `animated`, `id` and `name`, never the roles, creator or availability of
/// the full emoji object.
///
/// Reference:
/// - [Reaction Structure](https://discord.com/developers/docs/resources/channel#reaction-object-reaction-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ReactionEmoji {
    /// Null for unicode emojis
    pub id: Option<Snowflake>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

impl From<&Emoji> for ReactionEmoji {
    fn from(emoji: &Emoji) -> Self {
        Self {
            id: emoji.id.clone(),
            name: Some(emoji.name.clone()),
            animated: emoji.animated,
        }
    }
}

impl WireResource for ReactionEmoji {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "reaction emoji")
    }
}

/// The split between normal and super reactions of a count
///
/// Reference:
/// - [Reaction Count Details Structure](https://discord.com/developers/docs/resources/channel#reaction-count-details-object-reaction-count-details-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ReactionCountDetails {
    /// Count of super reactions
    pub burst: u64,
    /// Count of normal reactions
    pub normal: u64,
}

impl WireResource for ReactionCountDetails {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        let burst = require_u64(raw, "reaction count details", "burst")?;
        let normal = require_u64(raw, "reaction count details", "normal")?;

        Ok(Self { burst, normal })
    }
}

/// Represents a reaction to a message
///
/// Reference:
/// - [Reaction Structure](https://discord.com/developers/docs/resources/channel#reaction-object-reaction-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Reaction {
    /// Total number of times this emoji has been used to react, including
    /// super reactions
    pub count: u64,
    pub count_details: ReactionCountDetails,
    /// Whether the current user reacted using this emoji
    pub me: bool,
    /// Whether the current user super-reacted using this emoji
    pub me_burst: bool,
    pub emoji: ReactionEmoji,
    /// HEX colors used for the super reaction
    #[serde(default)]
    pub burst_colors: Vec<String>,
}

impl WireResource for Reaction {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let count = require_u64(raw, "reaction", "count")?;
        let count_details = raw.get("count_details")
            .ok_or_else(|| missing("reaction", "count_details"))
            .and_then(|details| ReactionCountDetails::from_raw(details, ctx))?;
        let me = require_bool(raw, "reaction", "me")?;
        let me_burst = raw["me_burst"].as_bool().unwrap_or(false);
        let emoji = raw.get("emoji")
            .ok_or_else(|| missing("reaction", "emoji"))
            .and_then(|emoji| ReactionEmoji::from_raw(emoji, ctx))?;
        let burst_colors = raw.get("burst_colors")
            .and_then(Value::as_array)
            .map(|colors| colors.iter().filter_map(Value::as_str).map(str::to_owned).collect())
            .unwrap_or_default();

        Ok(Self { count, count_details, me, me_burst, emoji, burst_colors })
    }
}

/// Represent a sticker item in a message
///
/// Reference:
/// - [Sticker Item Structure](https://discord.com/developers/docs/resources/channel#message-object-message-sticker-item-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StickerItem {
    pub id: Snowflake,
    pub name: String,
    pub format_type: StickerFormatType,
}

impl WireResource for StickerItem {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| missing("sticker item", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let name = crate::wire::require_str(raw, "sticker item", "name")?.to_owned();
        let format_type = raw.get("format_type")
            .ok_or_else(|| missing("sticker item", "format_type"))
            .and_then(|format| format.as_u64().ok_or_else(|| crate::wire::mismatch("sticker item", "format_type")))
            .map(StickerFormatType::from_code)?;

        Ok(Self { id, name, format_type })
    }
}

/// Metadata about the interaction a message was created from
///
/// Partially recursive: a modal submit response points back at the
/// interaction that opened the modal, so decoding bounds the nesting the
/// same way it bounds `referenced_message`.
///
/// Reference:
/// - [Message Interaction Metadata Structure](https://discord.com/developers/docs/resources/channel#message-interaction-metadata-object-message-interaction-metadata-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct MessageInteractionMetadata {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// User who triggered the interaction
    pub user: User,
    /// Installation contexts related to the interaction
    pub authorizing_integration_owners: HashMap<Snowflake, ApplicationIntegrationType>,
    /// Present only on follow-up messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_response_message_id: Option<Snowflake>,
    /// Present only on messages created from component interactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interacted_message_id: Option<Snowflake>,
    /// Present only on modal submit interactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggering_interaction_metadata: Option<Box<MessageInteractionMetadata>>,
}

impl WireResource for MessageInteractionMetadata {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let id = raw.get("id")
            .ok_or_else(|| missing("interaction metadata", "id"))
            .and_then(|id| Snowflake::from_raw(id, ctx))?;
        let kind = raw.get("type")
            .ok_or_else(|| missing("interaction metadata", "type"))
            .and_then(|kind| InteractionType::from_raw(kind, ctx))?;
        let user = raw.get("user")
            .ok_or_else(|| missing("interaction metadata", "user"))
            .and_then(|user| User::from_raw(user, ctx))?;
        let authorizing_integration_owners = raw.get("authorizing_integration_owners")
            .ok_or_else(|| missing("interaction metadata", "authorizing_integration_owners"))
            .and_then(|owners| from_serde(owners, "interaction metadata"))?;
        let original_response_message_id = decode_optional(raw, "original_response_message_id", |id| {
            Snowflake::from_raw(id, ctx)
        })?;
        let interacted_message_id = decode_optional(raw, "interacted_message_id", |id| {
            Snowflake::from_raw(id, ctx)
        })?;

        let triggering_interaction_metadata = match raw.get("triggering_interaction_metadata") {
            None | Some(Value::Null) => None,
            Some(value) => {
                if ctx.reference_allowed() {
                    ctx.enter_reference();
                    let nested = Self::from_raw(value, ctx);
                    ctx.leave_reference();
                    Some(Box::new(nested?))
                } else {
                    ctx.warn(DecodeWarning::ReferenceDepthExceeded {
                        resource: "interaction metadata".to_string(),
                    });
                    None
                }
            }
        };

        Ok(Self {
            id,
            kind,
            user,
            authorizing_integration_owners,
            original_response_message_id,
            interacted_message_id,
            triggering_interaction_metadata,
        })
    }
}

/// The resolved data a message carries for its auto-populated select menus.
///
/// A deliberate projection of [`ResolvedData`]: only the channel, member,
/// role and user maps are ever attached to a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolvedSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<HashMap<Snowflake, Channel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<HashMap<Snowflake, GuildMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<HashMap<Snowflake, crate::guild::Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<HashMap<Snowflake, User>>,
}

impl From<&ResolvedData> for ResolvedSelection {
    fn from(resolved: &ResolvedData) -> Self {
        Self {
            channels: resolved.channels.clone(),
            members: resolved.members.clone(),
            roles: resolved.roles.clone(),
            users: resolved.users.clone(),
        }
    }
}

impl WireResource for ResolvedSelection {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "resolved selection")
    }
}

/// The mention categories that can be parsed from message content
///
/// Reference:
/// - [Allowed Mention Types](https://discord.com/developers/docs/resources/channel#allowed-mentions-object-allowed-mention-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum AllowedMentionType {
    Everyone,
    Roles,
    Users,
    Unknown(String),
}

impl AllowedMentionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Everyone => "everyone",
            Self::Roles => "roles",
            Self::Users => "users",
            Self::Unknown(kind) => kind,
        }
    }

    pub fn from_str(kind: &str) -> Self {
        match kind {
            "everyone" => Self::Everyone,
            "roles" => Self::Roles,
            "users" => Self::Users,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl Serialize for AllowedMentionType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AllowedMentionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: String = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

/// Controls which mentions an outgoing message is allowed to ping.
///
/// A category listed in `parse` is mutually exclusive with the explicit id
/// array of the same category; see
/// [`validation::check_allowed_mentions`].
///
/// Reference:
/// - [Allowed Mentions Structure](https://discord.com/developers/docs/resources/channel#allowed-mentions-object-allowed-mentions-structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct AllowedMentions {
    /// The mention categories to parse from the content
    #[serde(default)]
    pub parse: Vec<AllowedMentionType>,
    /// Explicit role ids to mention (max 100)
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    /// Explicit user ids to mention (max 100)
    #[serde(default)]
    pub users: Vec<Snowflake>,
    /// For replies, whether to mention the author of the message being
    /// replied to
    #[serde(default)]
    pub replied_user: bool,
}

impl AllowedMentions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parse(mut self, category: AllowedMentionType) -> Self {
        self.parse.push(category);
        self
    }

    pub fn add_role(mut self, role: impl Into<Snowflake>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn add_user(mut self, user: impl Into<Snowflake>) -> Self {
        self.users.push(user.into());
        self
    }

    pub fn reply_to_author(mut self, replied_user: bool) -> Self {
        self.replied_user = replied_user;
        self
    }
}

impl WireResource for AllowedMentions {
    fn from_raw(raw: &Value, ctx: &mut DecodeContext) -> Result<Self> {
        let mentions: Self = from_serde(raw, "allowed mentions")?;
        validation::check_allowed_mentions(&mentions, ctx)?;

        Ok(mentions)
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

    fn author() -> Value {
        json!({
            "id": "82198898841029460",
            "username": "test",
            "discriminator": "9999",
            "avatar": "33ecab261d4681afa4d85a04691c4a01"
        })
    }

    fn minimal_message(id: &str) -> Value {
        json!({
            "id": id,
            "channel_id": "229293948829760512",
            "author": author(),
            "content": "Supa Hot",
            "timestamp": "2017-07-11T17:27:07.299Z",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 0
        })
    }

    #[test]
    fn every_documented_message_type_round_trips() {
        let documented = [
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
            25, 26, 27, 28, 29, 31, 32, 36, 37, 38, 39, 44,
        ];

        for code in documented {
            let kind = MessageType::from_code(code);
            assert!(!matches!(kind, MessageType::Unknown(_)), "code {code} should be documented");
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn reserved_message_type_codes_become_escape_values() {
        for code in [13, 30, 33, 34, 35, 40, 41, 42, 43, 97] {
            assert_eq!(MessageType::from_code(code), MessageType::Unknown(code));
        }
    }

    #[test]
    fn message_flag_algebra() {
        let flags = MessageFlags::combine(&[message_flags::EPHEMERAL, message_flags::LOADING]);
        assert!(flags.has(message_flags::EPHEMERAL));
        assert!(flags.has(message_flags::LOADING));
        assert!(!flags.has(message_flags::CROSSPOSTED));

        let without = flags.without(message_flags::EPHEMERAL);
        assert!(!without.has(message_flags::EPHEMERAL));
        assert!(without.has(message_flags::LOADING));
    }

    #[test]
    fn attachment_flags_live_in_their_own_bit_space() {
        let flags = AttachmentFlags::combine(&[attachment_flags::IS_REMIX]);
        assert!(flags.has(attachment_flags::IS_REMIX));
        assert!(flags.without(attachment_flags::IS_REMIX).is_empty());
    }

    #[test]
    fn message_round_trips_through_the_wire() {
        let raw = minimal_message("334385199974967042");

        let message: Message = crate::from_value(&raw).unwrap();
        assert_eq!(message.kind, MessageType::Default);
        assert_eq!(message.edited_timestamp, None);
        assert_eq!(message.referenced_message, None);
        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn serde_and_raw_decoders_agree_on_a_reply() {
        let mut raw = minimal_message("334385199974967042");
        raw["type"] = json!(19);
        raw["message_reference"] = json!({
            "message_id": "306588351130107906",
            "channel_id": "278325129692446722",
            "guild_id": "278325129692446720"
        });
        raw["referenced_message"] = Value::Null;

        let mut ctx = lenient();
        let from_raw = Message::from_raw(&raw, &mut ctx).unwrap();
        let from_serde: Message = crate::from_value(&raw).unwrap();

        assert_eq!(from_raw, from_serde);
        // null means the replied-to message was deleted, not that the field
        // was absent
        assert_eq!(from_raw.referenced_message, Some(None));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn reference_chain_is_truncated_at_the_configured_depth() {
        let mut deepest = minimal_message("3");
        deepest["type"] = json!(19);

        let mut middle = minimal_message("2");
        middle["type"] = json!(19);
        middle["referenced_message"] = deepest;

        let mut top = minimal_message("1");
        top["type"] = json!(19);
        top["referenced_message"] = middle;

        let decoded = crate::decode_message(&top).unwrap();

        // depth 1: the direct reference is decoded...
        let first = decoded.value.referenced_message.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(first.id, Snowflake::from("2"));
        // ...but its own reference is treated as already resolved
        assert_eq!(first.referenced_message, None);
        assert!(decoded.warnings.iter().any(|warning| {
            matches!(warning, DecodeWarning::ReferenceDepthExceeded { .. })
        }));
    }

    #[test]
    fn deeper_reference_limit_is_honored() {
        let mut middle = minimal_message("2");
        middle["referenced_message"] = minimal_message("3");
        let mut top = minimal_message("1");
        top["referenced_message"] = middle;

        let options = DecodeOptions { strict: false, max_reference_depth: 2 };
        let decoded = crate::decode_message_with(&top, options).unwrap();

        let first = decoded.value.referenced_message.as_ref().unwrap().as_ref().unwrap();
        let second = first.referenced_message.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(second.id, Snowflake::from("3"));
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn snapshot_projection_carries_exactly_the_reduced_field_set() {
        let message: Message = crate::from_value(&minimal_message("1")).unwrap();
        let snapshot = MessageSnapshotFields::from(&message);

        let encoded = serde_json::to_value(&snapshot).unwrap();
        let mut keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        // flags is skipped because the source message carries none
        assert_eq!(keys, vec![
            "attachments", "content", "edited_timestamp", "embeds", "mention_roles", "mentions",
            "timestamp", "type",
        ]);
    }

    #[test]
    fn reaction_emoji_projection_drops_the_full_emoji_surface() {
        // a full emoji payload decodes fine, but only the projected fields
        // survive serialization
        let raw = json!({
            "id": "41771983429993937",
            "name": "LUL",
            "animated": false,
            "roles": ["41771983429993000"],
            "require_colons": true,
            "managed": false,
            "available": true
        });

        let mut ctx = lenient();
        let emoji = ReactionEmoji::from_raw(&raw, &mut ctx).unwrap();
        let encoded = serde_json::to_value(&emoji).unwrap();

        let mut keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["animated", "id", "name"]);
    }

    #[test]
    fn projection_stays_in_sync_with_the_emoji_schema() {
        let emoji = Emoji::new(Some("41771983429993937".into()), "LUL");
        let projected = ReactionEmoji::from(&emoji);

        assert_eq!(projected.id, emoji.id);
        assert_eq!(projected.name.as_deref(), Some("LUL"));
    }

    #[test]
    fn nonce_accepts_integers_and_strings() {
        let int_message: Nonce = serde_json::from_value(json!(1234567)).unwrap();
        let text_message: Nonce = serde_json::from_value(json!("1234567")).unwrap();

        assert_eq!(int_message, Nonce::Integer(1234567));
        assert_eq!(text_message, Nonce::Text("1234567".into()));
        assert_eq!(serde_json::to_value(&int_message).unwrap(), json!(1234567));
        assert_eq!(serde_json::to_value(&text_message).unwrap(), json!("1234567"));
    }

    #[test]
    fn attachment_keeps_null_dimensions_distinct_from_absent() {
        let raw = json!({
            "id": "690651614658478102",
            "filename": "voice-message.ogg",
            "content_type": "audio/ogg",
            "size": 15141,
            "url": "https://example.com/voice-message.ogg",
            "proxy_url": "https://media.example.com/voice-message.ogg",
            "height": null,
            "width": null,
            "duration_secs": 5.7,
            "waveform": "AAAAAA=="
        });

        let mut ctx = lenient();
        let attachment = Attachment::from_raw(&raw, &mut ctx).unwrap();
        assert_eq!(attachment.height, Some(None));
        assert_eq!(attachment.width, Some(None));
        assert_eq!(attachment.duration_secs, Some(5.7));

        let from_serde: Attachment = crate::from_value(&raw).unwrap();
        assert_eq!(attachment, from_serde);
        assert_eq!(serde_json::to_value(&attachment).unwrap(), raw);
    }

    #[test]
    fn malformed_embed_does_not_fail_the_message() {
        let mut raw = minimal_message("1");
        raw["embeds"] = json!([
            { "title": "ok" },
            { "title": 42 }
        ]);

        let mut ctx = lenient();
        let message = Message::from_raw(&raw, &mut ctx).unwrap();

        assert_eq!(message.embeds.len(), 1);
        assert!(matches!(ctx.warnings()[0], DecodeWarning::SkippedElement { .. }));
    }

    #[test]
    fn interaction_metadata_recursion_is_bounded() {
        let mut raw = minimal_message("1");
        raw["interaction_metadata"] = json!({
            "id": "1",
            "type": 5,
            "user": author(),
            "authorizing_integration_owners": {},
            "triggering_interaction_metadata": {
                "id": "2",
                "type": 2,
                "user": author(),
                "authorizing_integration_owners": {},
                "triggering_interaction_metadata": {
                    "id": "3",
                    "type": 2,
                    "user": author(),
                    "authorizing_integration_owners": {}
                }
            }
        });

        let decoded = crate::decode_message(&raw).unwrap();
        let metadata = decoded.value.interaction_metadata.as_ref().unwrap();
        let nested = metadata.triggering_interaction_metadata.as_ref().unwrap();

        assert_eq!(nested.id, Snowflake::from("2"));
        assert_eq!(nested.triggering_interaction_metadata, None);
        assert!(decoded.warnings.iter().any(|warning| {
            matches!(warning, DecodeWarning::ReferenceDepthExceeded { .. })
        }));
    }
}
