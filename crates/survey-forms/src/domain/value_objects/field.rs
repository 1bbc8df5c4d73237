//! Field Schema
//!
//! A single survey question: its prompt, input type and type-specific
//! attributes.

use serde::{Deserialize, Serialize};

use super::{EntityId, FieldOption, FieldType};

/// One question of a survey
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub id: EntityId,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldSchema {
    /// Fresh field as the builder creates it: new id, empty label, and one
    /// seeded option for choice types.
    pub fn new(field_type: FieldType) -> Self {
        let options = if field_type.is_choice() {
            vec![FieldOption::numbered(1)]
        } else {
            vec![]
        };

        Self {
            id: EntityId::new(),
            label: String::new(),
            field_type,
            required: false,
            placeholder: None,
            description: None,
            options,
        }
    }

    /// Field with a known id and label, no options
    pub fn with_id(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: EntityId::from_string(id),
            label: label.into(),
            field_type,
            required: false,
            placeholder: None,
            description: None,
            options: vec![],
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn is_choice(&self) -> bool {
        self.field_type.is_choice()
    }

    /// First option whose stored value equals `value`
    pub fn option_by_value(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn default_option(&self) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.is_default)
    }

    /// On-screen caption of a checkbox: the placeholder if set, else the label
    pub fn caption(&self) -> &str {
        self.placeholder
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.label)
    }
}

/// Partial update merged into a field by the builder.
///
/// `None` leaves the attribute untouched. For `placeholder` and
/// `description`, `Some(None)` clears the attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub options: Option<Vec<FieldOption>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), ..Self::default() }
    }

    pub fn required(required: bool) -> Self {
        Self { required: Some(required), ..Self::default() }
    }

    pub fn placeholder(placeholder: Option<String>) -> Self {
        Self { placeholder: Some(placeholder), ..Self::default() }
    }

    pub fn description(description: Option<String>) -> Self {
        Self { description: Some(description), ..Self::default() }
    }

    pub fn options(options: Vec<FieldOption>) -> Self {
        Self { options: Some(options), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
