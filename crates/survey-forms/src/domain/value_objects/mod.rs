//! Value Objects module
//!
//! Field, option and survey schema types plus the response map.

pub mod field_type;
pub mod option;
pub mod field;
pub mod survey;
pub mod response;

pub use field_type::FieldType;
pub use option::{derive_option_value, FieldOption};
pub use field::{FieldPatch, FieldSchema};
pub use survey::{SchemaError, SurveySchema, ValidationErrors};
pub use response::{AnswerValue, ResponseError, ResponseMap};

/// Identifier value object for fields, options, surveys and submissions
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}
