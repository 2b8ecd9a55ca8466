//! Advisory validation of decoded payloads.
//!
//! The wire format does not tie field presence to the `type` discriminant of
//! a channel or message, and the protocol regularly grows fields before the
//! documentation catches up. The checks here therefore never reject a
//! payload on their own: the per-kind applicability pass only runs in strict
//! mode and only produces warnings, while the mutual-exclusion invariants
//! warn in lenient mode and fail in strict mode.

use serde_json::Value;
use error::{Error, Result, ValidationError};
use crate::channel::ChannelKind;
use crate::message::{AllowedMentionType, AllowedMentions, MessageType};
use crate::wire::{DecodeContext, DecodeWarning};
use crate::Snowflake;

// ---- channel applicability ------------------------------------------------

/// Fields meaningful on every channel kind
const CHANNEL_UNIVERSAL_FIELDS: &[&str] = &[
    "id", "type", "guild_id", "position", "permission_overwrites", "name", "topic", "nsfw",
    "last_message_id", "rate_limit_per_user", "owner_id", "parent_id", "last_pin_timestamp",
    "permissions", "flags", "default_auto_archive_duration",
];

const CHANNEL_VOICE_FIELDS: &[&str] = &["bitrate", "user_limit", "rtc_region", "video_quality_mode"];
const CHANNEL_VOICE_KINDS: &[ChannelKind] = &[ChannelKind::GuildVoice, ChannelKind::GuildStageVoice];

const CHANNEL_THREAD_FIELDS: &[&str] = &[
    "thread_metadata", "member", "member_count", "message_count", "total_message_sent",
    "applied_tags",
];
const CHANNEL_THREAD_KINDS: &[ChannelKind] = &[
    ChannelKind::AnnouncementThread, ChannelKind::PublicThread, ChannelKind::PrivateThread,
];

const CHANNEL_FORUM_FIELDS: &[&str] = &[
    "available_tags", "default_reaction_emoji", "default_sort_order", "default_forum_layout",
    "default_thread_rate_limit_per_user",
];
const CHANNEL_FORUM_KINDS: &[ChannelKind] = &[ChannelKind::GuildForum, ChannelKind::GuildMedia];

const CHANNEL_DM_FIELDS: &[&str] = &["recipients", "icon", "managed", "application_id"];
const CHANNEL_GROUP_DM_KINDS: &[ChannelKind] = &[ChannelKind::GroupDm];

const CHANNEL_FIELD_GROUPS: &[(&[ChannelKind], &[&str])] = &[
    (CHANNEL_VOICE_KINDS, CHANNEL_VOICE_FIELDS),
    (CHANNEL_THREAD_KINDS, CHANNEL_THREAD_FIELDS),
    (CHANNEL_FORUM_KINDS, CHANNEL_FORUM_FIELDS),
    (CHANNEL_GROUP_DM_KINDS, CHANNEL_DM_FIELDS),
];

/// The fields meaningful for a channel of the given kind.
///
/// Pure table lookup; an unknown kind is treated as if every field applied,
/// so forward-compatible payloads never warn.
pub fn channel_applicable_fields(kind: &ChannelKind) -> Vec<&'static str> {
    let mut fields = CHANNEL_UNIVERSAL_FIELDS.to_vec();

    if matches!(kind, ChannelKind::Unknown(_)) {
        for (_, group) in CHANNEL_FIELD_GROUPS {
            fields.extend_from_slice(group);
        }
        return fields;
    }

    for (kinds, group) in CHANNEL_FIELD_GROUPS {
        if kinds.contains(kind) {
            fields.extend_from_slice(group);
        }
    }

    // a plain DM carries recipients but none of the group-DM management
    // fields
    if *kind == ChannelKind::Dm {
        fields.push("recipients");
    }

    fields
}

/// Strict-mode pass over a raw channel payload: flag conditional fields that
/// are present although the kind does not use them. Warnings only.
pub(crate) fn check_channel_kind(raw: &Value, kind: &ChannelKind, ctx: &mut DecodeContext) {
    if matches!(kind, ChannelKind::Unknown(_)) {
        return;
    }

    let applicable = channel_applicable_fields(kind);
    for (_, group) in CHANNEL_FIELD_GROUPS {
        for field in *group {
            if raw.get(*field).is_some() && !applicable.contains(field) {
                ctx.warn(DecodeWarning::InapplicableField {
                    resource: "channel".to_string(),
                    field: (*field).to_string(),
                    kind: format!("{kind:?}"),
                });
            }
        }
    }

    if kind.is_thread() && raw.get("thread_metadata").is_none() {
        ctx.warn(DecodeWarning::MissingFieldForKind {
            resource: "channel".to_string(),
            field: "thread_metadata".to_string(),
            kind: format!("{kind:?}"),
        });
    }
}

// ---- message applicability ------------------------------------------------

/// Fields meaningful on every message kind
const MESSAGE_UNIVERSAL_FIELDS: &[&str] = &[
    "id", "channel_id", "author", "content", "timestamp", "edited_timestamp", "tts",
    "mention_everyone", "mentions", "mention_roles", "mention_channels", "attachments", "embeds",
    "reactions", "nonce", "pinned", "webhook_id", "type", "flags", "components", "sticker_items",
    "stickers", "position", "thread", "poll", "resolved",
];

const MESSAGE_RICH_PRESENCE_FIELDS: &[&str] = &["activity", "application", "application_id"];
const MESSAGE_RICH_PRESENCE_KINDS: &[MessageType] = &[
    MessageType::Default, MessageType::ChatInputCommand, MessageType::ContextMenuCommand,
];

const MESSAGE_REFERENCE_FIELDS: &[&str] = &[
    "message_reference", "referenced_message", "message_snapshots",
];
const MESSAGE_REFERENCE_KINDS: &[MessageType] = &[
    MessageType::Default, MessageType::Reply, MessageType::ChannelPinnedMessage,
    MessageType::ChannelFollowAdd, MessageType::ThreadCreated, MessageType::ThreadStarterMessage,
    MessageType::AutoModerationAction,
];

const MESSAGE_INTERACTION_FIELDS: &[&str] = &["interaction", "interaction_metadata"];
const MESSAGE_INTERACTION_KINDS: &[MessageType] = &[
    MessageType::Default, MessageType::ChatInputCommand, MessageType::ContextMenuCommand,
];

const MESSAGE_CALL_FIELDS: &[&str] = &["call"];
const MESSAGE_CALL_KINDS: &[MessageType] = &[MessageType::Call];

const MESSAGE_ROLE_SUBSCRIPTION_FIELDS: &[&str] = &["role_subscription_data"];
const MESSAGE_ROLE_SUBSCRIPTION_KINDS: &[MessageType] = &[MessageType::RoleSubscriptionPurchase];

const MESSAGE_FIELD_GROUPS: &[(&[MessageType], &[&str])] = &[
    (MESSAGE_RICH_PRESENCE_KINDS, MESSAGE_RICH_PRESENCE_FIELDS),
    (MESSAGE_REFERENCE_KINDS, MESSAGE_REFERENCE_FIELDS),
    (MESSAGE_INTERACTION_KINDS, MESSAGE_INTERACTION_FIELDS),
    (MESSAGE_CALL_KINDS, MESSAGE_CALL_FIELDS),
    (MESSAGE_ROLE_SUBSCRIPTION_KINDS, MESSAGE_ROLE_SUBSCRIPTION_FIELDS),
];

/// Fields a message kind mandates; their absence is reported in strict mode
const MESSAGE_REQUIRED_FOR_KIND: &[(MessageType, &str)] = &[
    (MessageType::Call, "call"),
    (MessageType::RoleSubscriptionPurchase, "role_subscription_data"),
];

/// The fields meaningful for a message of the given kind.
///
/// Pure table lookup over the kind groups; an unknown kind is treated as if
/// every field applied.
pub fn message_applicable_fields(kind: &MessageType) -> Vec<&'static str> {
    let mut fields = MESSAGE_UNIVERSAL_FIELDS.to_vec();

    if matches!(kind, MessageType::Unknown(_)) {
        for (_, group) in MESSAGE_FIELD_GROUPS {
            fields.extend_from_slice(group);
        }
        return fields;
    }

    for (kinds, group) in MESSAGE_FIELD_GROUPS {
        if kinds.contains(kind) {
            fields.extend_from_slice(group);
        }
    }

    fields
}

/// Strict-mode pass over a raw message payload: flag conditional fields that
/// are present although the kind does not use them, and kind-mandated fields
/// that are absent. Warnings only, the decode itself never fails here.
pub(crate) fn check_message_kind(raw: &Value, kind: &MessageType, ctx: &mut DecodeContext) {
    if matches!(kind, MessageType::Unknown(_)) {
        return;
    }

    let applicable = message_applicable_fields(kind);
    for (_, group) in MESSAGE_FIELD_GROUPS {
        for field in *group {
            if raw.get(*field).is_some() && !applicable.contains(field) {
                ctx.warn(DecodeWarning::InapplicableField {
                    resource: "message".to_string(),
                    field: (*field).to_string(),
                    kind: format!("{kind:?}"),
                });
            }
        }
    }

    for (required_kind, field) in MESSAGE_REQUIRED_FOR_KIND {
        if required_kind == kind && raw.get(*field).is_none() {
            ctx.warn(DecodeWarning::MissingFieldForKind {
                resource: "message".to_string(),
                field: (*field).to_string(),
                kind: format!("{kind:?}"),
            });
        }
    }
}

// ---- mutual exclusion -----------------------------------------------------

/// A mention category listed in `parse` must not also carry an explicit id
/// array: the two mechanisms override each other upstream.
///
/// Lenient mode warns, strict mode fails with
/// [`ValidationError::MentionExclusivity`].
pub fn check_allowed_mentions(mentions: &AllowedMentions, ctx: &mut DecodeContext) -> Result<()> {
    let overlapping = [
        (AllowedMentionType::Roles, !mentions.roles.is_empty()),
        (AllowedMentionType::Users, !mentions.users.is_empty()),
    ];

    for (category, has_explicit_ids) in overlapping {
        if has_explicit_ids && mentions.parse.contains(&category) {
            if ctx.options.strict {
                return Err(Error::Validation(ValidationError::MentionExclusivity(format!(
                    "Mention category '{}' is parsed and listed explicitly at the same time",
                    category.as_str()
                ))));
            }

            ctx.warn(DecodeWarning::MentionExclusivity {
                category: category.as_str().to_string(),
            });
        }
    }

    Ok(())
}

/// At most one of `emoji_id` and `emoji_name` may carry a value: a custom
/// emoji sets the id, a unicode emoji sets the name, and both being
/// null or absent together is valid.
///
/// Lenient mode warns, strict mode fails with
/// [`ValidationError::EmojiExclusivity`].
pub(crate) fn check_emoji_exclusivity(
    structure: &str,
    emoji_id: &Option<Option<Snowflake>>,
    emoji_name: &Option<Option<String>>,
    ctx: &mut DecodeContext,
) -> Result<()> {
    let both_set = matches!(emoji_id, Some(Some(_))) && matches!(emoji_name, Some(Some(_)));
    if !both_set {
        return Ok(());
    }

    if ctx.options.strict {
        return Err(Error::Validation(ValidationError::EmojiExclusivity(format!(
            "Both 'emoji_id' and 'emoji_name' carry a value on the {structure}"
        ))));
    }

    ctx.warn(DecodeWarning::EmojiExclusivity {
        structure: structure.to_string(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use crate::wire::{DecodeContext, DecodeOptions, DecodeWarning, WireResource};
    use super::*;

    #[test]
    fn voice_fields_apply_to_voice_kinds_only() {
        for kind in [ChannelKind::GuildVoice, ChannelKind::GuildStageVoice] {
            let fields = channel_applicable_fields(&kind);
            for field in ["bitrate", "user_limit", "rtc_region", "video_quality_mode"] {
                assert!(fields.contains(&field), "{kind:?} should allow {field}");
            }
        }

        let text = channel_applicable_fields(&ChannelKind::GuildText);
        assert!(!text.contains(&"bitrate"));
        assert!(!text.contains(&"rtc_region"));
    }

    #[test]
    fn thread_fields_apply_to_thread_kinds_only() {
        for kind in [
            ChannelKind::AnnouncementThread, ChannelKind::PublicThread, ChannelKind::PrivateThread,
        ] {
            let fields = channel_applicable_fields(&kind);
            for field in [
                "thread_metadata", "member", "member_count", "message_count", "total_message_sent",
                "applied_tags",
            ] {
                assert!(fields.contains(&field), "{kind:?} should allow {field}");
            }
        }

        assert!(!channel_applicable_fields(&ChannelKind::GuildText).contains(&"thread_metadata"));
    }

    #[test]
    fn forum_fields_apply_to_forum_and_media() {
        for kind in [ChannelKind::GuildForum, ChannelKind::GuildMedia] {
            let fields = channel_applicable_fields(&kind);
            for field in [
                "available_tags", "default_reaction_emoji", "default_sort_order",
                "default_forum_layout", "default_thread_rate_limit_per_user",
            ] {
                assert!(fields.contains(&field), "{kind:?} should allow {field}");
            }
        }
    }

    #[test]
    fn dm_fields_split_between_dm_and_group_dm() {
        let dm = channel_applicable_fields(&ChannelKind::Dm);
        assert!(dm.contains(&"recipients"));
        assert!(!dm.contains(&"icon"));
        assert!(!dm.contains(&"application_id"));

        let group = channel_applicable_fields(&ChannelKind::GroupDm);
        for field in ["recipients", "icon", "managed", "application_id"] {
            assert!(group.contains(&field), "group DM should allow {field}");
        }
    }

    #[test]
    fn unknown_channel_kind_allows_everything() {
        let fields = channel_applicable_fields(&ChannelKind::Unknown(42));
        assert!(fields.contains(&"bitrate"));
        assert!(fields.contains(&"thread_metadata"));
        assert!(fields.contains(&"available_tags"));
    }

    #[test]
    fn message_groups_match_the_kind_table() {
        let default = message_applicable_fields(&MessageType::Default);
        for field in [
            "activity", "application", "application_id", "message_reference",
            "referenced_message", "message_snapshots", "interaction", "interaction_metadata",
        ] {
            assert!(default.contains(&field), "Default should allow {field}");
        }
        assert!(!default.contains(&"call"));
        assert!(!default.contains(&"role_subscription_data"));

        let call = message_applicable_fields(&MessageType::Call);
        assert!(call.contains(&"call"));
        assert!(!call.contains(&"activity"));

        let purchase = message_applicable_fields(&MessageType::RoleSubscriptionPurchase);
        assert!(purchase.contains(&"role_subscription_data"));

        let reply = message_applicable_fields(&MessageType::Reply);
        assert!(reply.contains(&"referenced_message"));
        assert!(!reply.contains(&"activity"));
    }

    fn minimal_message(kind: u64) -> Value {
        json!({
            "id": "123",
            "channel_id": "456",
            "author": {
                "id": "789",
                "username": "test",
                "discriminator": "0",
                "avatar": null
            },
            "content": "",
            "timestamp": "2017-07-11T17:27:07.299Z",
            "edited_timestamp": null,
            "type": kind
        })
    }

    #[test]
    fn default_kind_without_conditional_fields_is_clean_in_strict_mode() {
        let decoded = crate::decode_message_with(&minimal_message(0), DecodeOptions::strict()).unwrap();
        assert_eq!(decoded.warnings, vec![]);
    }

    #[test]
    fn call_kind_without_call_field_warns_in_strict_mode_only() {
        let lenient = crate::decode_message(&minimal_message(3)).unwrap();
        assert_eq!(lenient.warnings, vec![]);

        let strict = crate::decode_message_with(&minimal_message(3), DecodeOptions::strict()).unwrap();
        assert_eq!(strict.warnings, vec![DecodeWarning::MissingFieldForKind {
            resource: "message".to_string(),
            field: "call".to_string(),
            kind: "Call".to_string(),
        }]);
    }

    #[test]
    fn inapplicable_field_warns_in_strict_mode_but_never_fails() {
        let mut raw = minimal_message(0);
        raw["role_subscription_data"] = json!({
            "role_subscription_listing_id": "1",
            "tier_name": "gold",
            "total_months_subscribed": 4,
            "is_renewal": false
        });

        let lenient = crate::decode_message(&raw).unwrap();
        assert_eq!(lenient.warnings, vec![]);

        let strict = crate::decode_message_with(&raw, DecodeOptions::strict()).unwrap();
        assert_eq!(strict.warnings, vec![DecodeWarning::InapplicableField {
            resource: "message".to_string(),
            field: "role_subscription_data".to_string(),
            kind: "Default".to_string(),
        }]);
        // the field is still decoded
        assert!(strict.value.role_subscription_data.is_some());
    }

    #[test]
    fn allowed_mentions_overlap_warns_then_fails_in_strict_mode() {
        let raw = json!({
            "parse": ["users"],
            "users": ["123"],
            "roles": [],
            "replied_user": false
        });

        let mut ctx = DecodeContext::new(DecodeOptions::default());
        let mentions = AllowedMentions::from_raw(&raw, &mut ctx).unwrap();
        assert_eq!(mentions.users.len(), 1);
        assert_eq!(ctx.warnings(), &[DecodeWarning::MentionExclusivity {
            category: "users".to_string(),
        }]);

        let mut strict = DecodeContext::new(DecodeOptions::strict());
        let err = AllowedMentions::from_raw(&raw, &mut strict).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MentionExclusivity(_))));
    }

    #[test]
    fn allowed_mentions_without_overlap_is_clean() {
        let raw = json!({
            "parse": ["everyone", "roles"],
            "users": ["123"],
            "roles": [],
            "replied_user": true
        });

        let mut strict = DecodeContext::new(DecodeOptions::strict());
        assert!(AllowedMentions::from_raw(&raw, &mut strict).is_ok());
        assert_eq!(strict.warnings(), &[]);
    }

    #[test]
    fn emoji_exclusivity_fails_only_in_strict_mode() {
        let raw = json!({ "emoji_id": "2", "emoji_name": "🔥" });

        let mut lenient = DecodeContext::new(DecodeOptions::default());
        assert!(crate::channel::DefaultReaction::from_raw(&raw, &mut lenient).is_ok());
        assert_eq!(lenient.warnings().len(), 1);

        let mut strict = DecodeContext::new(DecodeOptions::strict());
        let err = crate::channel::DefaultReaction::from_raw(&raw, &mut strict).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmojiExclusivity(_))));
    }

    #[test]
    fn strict_channel_check_flags_thread_fields_on_a_text_channel() {
        let raw = json!({
            "id": "123",
            "type": 0,
            "member_count": 3
        });

        let lenient = crate::decode_channel(&raw).unwrap();
        assert_eq!(lenient.warnings, vec![]);

        let strict = crate::decode_channel_with(&raw, DecodeOptions::strict()).unwrap();
        assert_eq!(strict.warnings, vec![DecodeWarning::InapplicableField {
            resource: "channel".to_string(),
            field: "member_count".to_string(),
            kind: "GuildText".to_string(),
        }]);
    }
}
