//! Domain Events
//!
//! Raised by the builder and by submissions so hosts can audit edits and
//! notify reviewers.

use chrono::{DateTime, Utc};
use crate::domain::value_objects::{EntityId, FieldType};

/// All domain events in the survey bounded context
#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Survey(SurveyEvent),
    Submission(SubmissionEvent),
}

/// Schema editing events
#[derive(Clone, Debug, PartialEq)]
pub enum SurveyEvent {
    FieldAdded {
        field_id: EntityId,
        field_type: FieldType,
        position: usize,
    },

    FieldRemoved {
        field_id: EntityId,
        position: usize,
    },

    FieldMoved {
        field_id: EntityId,
        from: usize,
        to: usize,
    },

    Saved {
        field_count: usize,
        saved_at: DateTime<Utc>,
    },

    EditCancelled {
        restored_fields: usize,
    },
}

/// Respondent submission events
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionEvent {
    Received {
        submission_id: EntityId,
        survey_id: EntityId,
        answered: usize,
        submitted_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Survey(e) => match e {
                SurveyEvent::FieldAdded { .. } => "survey.field_added",
                SurveyEvent::FieldRemoved { .. } => "survey.field_removed",
                SurveyEvent::FieldMoved { .. } => "survey.field_moved",
                SurveyEvent::Saved { .. } => "survey.saved",
                SurveyEvent::EditCancelled { .. } => "survey.edit_cancelled",
            },
            DomainEvent::Submission(e) => match e {
                SubmissionEvent::Received { .. } => "submission.received",
            },
        }
    }
}
