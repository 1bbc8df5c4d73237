//! Field Option Value Object
//!
//! One selectable answer of a dropdown or radio question.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Selectable option of a choice field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub id: EntityId,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
}

impl FieldOption {
    /// Create an option whose value is derived from its label
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: EntityId::new(),
            value: derive_option_value(&label),
            label,
            is_default: false,
        }
    }

    /// Create an option with an explicit value
    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            label: label.into(),
            value: value.into(),
            is_default: false,
        }
    }

    /// Placeholder option `Option N` / `option_N`
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("Option {}", n))
    }

    /// Relabel the option, re-deriving its value
    pub fn relabel(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.value = derive_option_value(&self.label);
    }
}

/// Machine value for an option label: lower-cased, every whitespace run
/// replaced by a single underscore. Punctuation is kept as-is.
pub fn derive_option_value(label: &str) -> String {
    let mut value = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                value.push('_');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            value.extend(c.to_lowercase());
        }
    }
    value
}

fn is_false(b: &bool) -> bool {
    !*b
}
