//! Field Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of input a survey question collects.
///
/// Persisted schemas carry the type as an upper-case string. Strings this
/// version does not know load as [`FieldType::Unsupported`]; such fields are
/// skipped by the renderer instead of failing the whole survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Dropdown,
    Checkbox,
    Radio,
    #[serde(other)]
    Unsupported,
}

impl FieldType {
    /// Every type an operator can add to a survey
    pub const SUPPORTED: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Dropdown,
        FieldType::Checkbox,
        FieldType::Radio,
    ];

    /// Dropdown and radio fields answer from an option list
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio)
    }

    /// Whether the placeholder is used: as a hint inside text-like inputs,
    /// or as the caption of a checkbox
    pub fn accepts_placeholder(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea | Self::Number | Self::Checkbox)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Textarea => "TEXTAREA",
            Self::Number => "NUMBER",
            Self::Dropdown => "DROPDOWN",
            Self::Checkbox => "CHECKBOX",
            Self::Radio => "RADIO",
            Self::Unsupported => "UNSUPPORTED",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field type: {}", s))
    }
}
