use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use error::Result;
use crate::channel::ChannelKind;
use crate::components::Emoji;
use crate::wire::{from_serde, DecodeContext, WireResource};

/// The type discriminant of a message component
///
/// Reference:
/// - [Discord Docs](https://discord.com/developers/docs/interactions/message-components#component-object-component-types)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ComponentType {
    ActionRow,
    Button,
    StringSelect,
    TextInput,
    UserSelect,
    RoleSelect,
    MentionableSelect,
    ChannelSelect,
    Unknown(u64),
}

impl ComponentType {
    pub fn code(&self) -> u64 {
        match self {
            Self::ActionRow => 1,
            Self::Button => 2,
            Self::StringSelect => 3,
            Self::TextInput => 4,
            Self::UserSelect => 5,
            Self::RoleSelect => 6,
            Self::MentionableSelect => 7,
            Self::ChannelSelect => 8,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::StringSelect,
            4 => Self::TextInput,
            5 => Self::UserSelect,
            6 => Self::RoleSelect,
            7 => Self::MentionableSelect,
            8 => Self::ChannelSelect,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for ComponentType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represents an action row in a message
///
/// Reference:
/// - [Action Row Structure](https://discord.com/developers/docs/interactions/message-components#action-row-object-action-row-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Default for ActionRow {
    fn default() -> Self {
        Self {
            kind: ComponentType::ActionRow,
            components: Vec::new(),
        }
    }
}

impl ActionRow {
    /// Creates a new action row
    pub fn new() -> Self {
        Self::default()
    }
}

impl WireResource for ActionRow {
    fn from_raw(raw: &Value, _: &mut DecodeContext) -> Result<Self> {
        from_serde(raw, "action row")
    }
}

/// Represents a component inside an action row
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[allow(clippy::large_enum_variant)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
}

/// Represents a button in a message
///
/// Reference:
/// - [Button Structure](https://discord.com/developers/docs/interactions/message-components#button-object-button-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    /// Absent on link buttons, which carry `url` instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Represents a button style
///
/// Reference:
/// - [Button Styles](https://discord.com/developers/docs/interactions/message-components#button-object-button-styles)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
    Unknown(u64),
}

impl ButtonStyle {
    pub fn code(&self) -> u64 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Success => 3,
            Self::Danger => 4,
            Self::Link => 5,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Success,
            4 => Self::Danger,
            5 => Self::Link,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for ButtonStyle {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for ButtonStyle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

/// Represents a select menu in a message
///
/// Reference:
/// - [Select Menu Structure](https://discord.com/developers/docs/interactions/message-components#select-menu-object-select-menu-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SelectMenu {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    /// Specified choices, only available for string selects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Channel types to include, only for channel selects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<ChannelKind>>,
    /// Placeholder text if nothing is selected, maximum 150 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Represents a select option in a select menu
///
/// Reference:
/// - [Select Option Structure](https://discord.com/developers/docs/interactions/message-components#select-option-object-select-option-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Represents a text input in a modal
///
/// Reference:
/// - [Text Input Structure](https://discord.com/developers/docs/interactions/message-components#text-input-object-text-input-structure)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TextInput {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextInputStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Only in modal submissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Represents a text input style
///
/// Reference:
/// - [Text Input Styles](https://discord.com/developers/docs/interactions/message-components#text-inputs-text-input-styles)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TextInputStyle {
    Short,
    Paragraph,
    Unknown(u64),
}

impl TextInputStyle {
    pub fn code(&self) -> u64 {
        match self {
            Self::Short => 1,
            Self::Paragraph => 2,
            Self::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Short,
            2 => Self::Paragraph,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for TextInputStyle {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for TextInputStyle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let value: u64 = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_code(value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn action_row_round_trips_a_button() {
        let raw = json!({
            "type": 1,
            "components": [{
                "type": 2,
                "style": 1,
                "label": "Click me!",
                "custom_id": "click_one"
            }]
        });

        let row: ActionRow = crate::from_value(&raw).unwrap();
        assert_eq!(row.kind, ComponentType::ActionRow);
        assert!(matches!(row.components[0], Component::Button(_)));
        assert_eq!(serde_json::to_value(&row).unwrap(), raw);
    }

    #[test]
    fn undocumented_component_type_is_preserved() {
        assert_eq!(ComponentType::from_code(17), ComponentType::Unknown(17));
        assert_eq!(ComponentType::Unknown(17).code(), 17);
    }
}
