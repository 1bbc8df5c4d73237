//! Response Map
//!
//! Answers keyed by field id. Text-like and choice answers are strings,
//! number answers are the raw numeric string, checkbox answers are booleans.
//! Unanswered optional questions are simply absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use super::{EntityId, FieldSchema, FieldType, SurveySchema};

/// Typed answer written by the renderer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

impl From<AnswerValue> for Value {
    fn from(answer: AnswerValue) -> Self {
        match answer {
            AnswerValue::Text(s) => Value::String(s),
            AnswerValue::Flag(b) => Value::Bool(b),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Answers of one respondent, keyed by field id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(HashMap<String, Value>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.0.get(field_id)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    /// Write an answer, replacing any previous one. Other keys are untouched.
    pub fn set(&mut self, field_id: &str, answer: impl Into<AnswerValue>) -> Option<Value> {
        self.0.insert(field_id.to_string(), answer.into().into())
    }

    /// Store an answer replayed from storage as-is
    pub fn insert_raw(&mut self, field_id: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field_id.into(), value)
    }

    pub fn remove(&mut self, field_id: &str) -> Option<Value> {
        self.0.remove(field_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop answers whose field no longer exists in `schema`
    pub fn retain_known(&mut self, schema: &SurveySchema) -> usize {
        let before = self.0.len();
        self.0.retain(|id, _| schema.field(id).is_some());
        before - self.0.len()
    }

    /// Whether `field` counts as answered.
    ///
    /// Blank strings and nulls are unanswered. A required checkbox must be
    /// ticked, matching native required-checkbox semantics.
    pub fn is_answered(&self, field: &FieldSchema) -> bool {
        match self.get(field.id.as_str()) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Bool(b)) => field.field_type != FieldType::Checkbox || *b,
            Some(_) => true,
        }
    }

    /// Every required question without an answer, in schema order
    pub fn check_required(&self, schema: &SurveySchema) -> Result<(), Vec<ResponseError>> {
        let missing: Vec<ResponseError> = schema
            .fields()
            .iter()
            .filter(|f| f.required && f.field_type.is_supported() && !self.is_answered(f))
            .map(|f| ResponseError::MissingRequired {
                field_id: f.id.clone(),
                label: f.label.clone(),
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

impl FromIterator<(String, Value)> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rejected respondent input or incomplete submission
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ResponseError {
    #[error("required question \"{label}\" was not answered")]
    MissingRequired { field_id: EntityId, label: String },

    #[error("no question with id {0}")]
    UnknownField(String),

    #[error("question {0} cannot be answered in this version")]
    UnsupportedField(EntityId),

    #[error("\"{value}\" is not an option of \"{label}\"")]
    UnknownOption { field_id: EntityId, label: String, value: String },

    #[error("\"{label}\" expects a number, got \"{value}\"")]
    NotANumber { field_id: EntityId, label: String, value: String },

    #[error("\"{label}\" expects true or false, got \"{value}\"")]
    NotAToggle { field_id: EntityId, label: String, value: String },
}
