//! Submission Aggregate
//!
//! One respondent's completed answers to a survey, together with whatever
//! extra form fields the host collected alongside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, SubmissionEvent};
use crate::domain::value_objects::{EntityId, ResponseMap};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    id: EntityId,
    survey_id: EntityId,
    responses: ResponseMap,
    #[serde(default)]
    extra: serde_json::Map<String, serde_json::Value>,
    submitted_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Submission {
    pub fn create(
        survey_id: EntityId,
        responses: ResponseMap,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut submission = Self {
            id: id.clone(),
            survey_id: survey_id.clone(),
            responses,
            extra,
            submitted_at: now,
            events: vec![],
        };

        let answered = submission.responses.len();
        submission.events.push(DomainEvent::Submission(SubmissionEvent::Received {
            submission_id: id,
            survey_id,
            answered,
            submitted_at: now,
        }));

        submission
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn survey_id(&self) -> &EntityId { &self.survey_id }
    pub fn responses(&self) -> &ResponseMap { &self.responses }
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> { &self.extra }
    pub fn submitted_at(&self) -> DateTime<Utc> { self.submitted_at }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}
