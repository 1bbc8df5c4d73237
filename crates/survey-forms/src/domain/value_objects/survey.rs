//! Survey Schema
//!
//! Ordered list of questions. Array position is display and answer order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::{EntityId, FieldSchema, FieldType};

/// Ordered survey definition as handed across the persistence boundary
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl SurveySchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by id
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id.as_str() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id.as_str() == id)
    }

    /// Check the schema is fit to be rendered for respondents.
    ///
    /// Collects every problem instead of stopping at the first one so each
    /// offending field can be flagged at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.fields.is_empty() {
            errors.push(SchemaError::NoFields);
        }

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if !seen.insert(field.id.as_str()) {
                errors.push(SchemaError::DuplicateFieldId {
                    index,
                    field_id: field.id.clone(),
                });
            }

            if field.label.trim().is_empty() {
                errors.push(SchemaError::EmptyLabel {
                    index,
                    field_id: field.id.clone(),
                });
            }

            if !field.is_choice() {
                continue;
            }

            if field.options.is_empty() {
                errors.push(SchemaError::NoOptions {
                    index,
                    field_id: field.id.clone(),
                    field_type: field.field_type,
                });
            }

            for (option_index, option) in field.options.iter().enumerate() {
                if option.label.trim().is_empty() {
                    errors.push(SchemaError::EmptyOptionLabel {
                        index,
                        field_id: field.id.clone(),
                        option_index,
                    });
                }
                if option.value.trim().is_empty() {
                    errors.push(SchemaError::EmptyOptionValue {
                        index,
                        field_id: field.id.clone(),
                        option_index,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single reason a schema is not valid
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("survey has no questions")]
    NoFields,

    #[error("question {} has an empty label", .index + 1)]
    EmptyLabel { index: usize, field_id: EntityId },

    #[error("question {} is a {field_type} field without options", .index + 1)]
    NoOptions { index: usize, field_id: EntityId, field_type: FieldType },

    #[error("option {} of question {} has an empty label", .option_index + 1, .index + 1)]
    EmptyOptionLabel { index: usize, field_id: EntityId, option_index: usize },

    #[error("option {} of question {} has an empty value", .option_index + 1, .index + 1)]
    EmptyOptionValue { index: usize, field_id: EntityId, option_index: usize },

    #[error("question {} reuses field id {field_id}", .index + 1)]
    DuplicateFieldId { index: usize, field_id: EntityId },
}

impl SchemaError {
    /// Field the error should be shown next to; `None` for schema-level errors
    pub fn field_id(&self) -> Option<&EntityId> {
        match self {
            Self::NoFields => None,
            Self::EmptyLabel { field_id, .. }
            | Self::NoOptions { field_id, .. }
            | Self::EmptyOptionLabel { field_id, .. }
            | Self::EmptyOptionValue { field_id, .. }
            | Self::DuplicateFieldId { field_id, .. } => Some(field_id),
        }
    }

    pub fn field_index(&self) -> Option<usize> {
        match self {
            Self::NoFields => None,
            Self::EmptyLabel { index, .. }
            | Self::NoOptions { index, .. }
            | Self::EmptyOptionLabel { index, .. }
            | Self::EmptyOptionValue { index, .. }
            | Self::DuplicateFieldId { index, .. } => Some(*index),
        }
    }
}

/// Every problem found by one validation pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(Vec<SchemaError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[SchemaError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors to show inline next to one field
    pub fn for_field<'a>(&'a self, field_id: &'a EntityId) -> impl Iterator<Item = &'a SchemaError> + 'a {
        self.0.iter().filter(move |e| e.field_id() == Some(field_id))
    }

    pub fn has_schema_error(&self) -> bool {
        self.0.iter().any(|e| e.field_id().is_none())
    }
}

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "survey is invalid")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, error)?;
        }
        Ok(())
    }
}
