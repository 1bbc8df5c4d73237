//! Data Transfer Objects (DTOs)
//!
//! Shapes exchanged with the host: the submission body it posts and the
//! review view it reads back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::aggregates::Submission;
use crate::domain::services::FormattedEntry;
use crate::domain::value_objects::{EntityId, ResponseMap};

/// Body a host form posts on submit: the survey answers plus whatever other
/// form fields the host collects (cover letter, headshot reference, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(default)]
    pub survey_responses: ResponseMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmissionPayload {
    pub fn new(survey_responses: ResponseMap) -> Self {
        Self { survey_responses, extra: Map::new() }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Read model of one submission for reviewers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub submission_id: EntityId,
    pub survey_id: EntityId,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerView>,
    pub has_unanswered: bool,
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub field_id: EntityId,
    pub question: String,
    pub answer: String,
    pub preformatted: bool,
}

impl From<FormattedEntry> for AnswerView {
    fn from(entry: FormattedEntry) -> Self {
        Self {
            field_id: entry.field_id,
            question: entry.label,
            answer: entry.display,
            preformatted: entry.layout == crate::domain::services::DisplayLayout::Preformatted,
        }
    }
}

impl SubmissionView {
    pub fn new(submission: &Submission, entries: Vec<FormattedEntry>, has_unanswered: bool) -> Self {
        Self {
            submission_id: submission.id().clone(),
            survey_id: submission.survey_id().clone(),
            submitted_at: submission.submitted_at(),
            answers: entries.into_iter().map(AnswerView::from).collect(),
            has_unanswered,
            extra: submission.extra().clone(),
        }
    }
}
