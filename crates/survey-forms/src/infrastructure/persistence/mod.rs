//! In-memory repository implementations
//!
//! Used by tests, the CLI and hosts that keep surveys in process.

use std::sync::Mutex;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{EntityId, SurveySchema};
use crate::domain::DomainEvent;
use crate::ports::outbound::{EventPublisher, RepositoryError, SubmissionRepository, SurveyRepository};

/// In-memory survey repository
#[derive(Default)]
pub struct InMemorySurveyRepository {
    surveys: DashMap<EntityId, SurveySchema>,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn find(&self, owner_id: &EntityId) -> Result<Option<SurveySchema>, RepositoryError> {
        Ok(self.surveys.get(owner_id).map(|s| s.value().clone()))
    }

    async fn save(&self, owner_id: &EntityId, schema: &SurveySchema) -> Result<(), RepositoryError> {
        self.surveys.insert(owner_id.clone(), schema.clone());
        Ok(())
    }

    async fn delete(&self, owner_id: &EntityId) -> Result<(), RepositoryError> {
        self.surveys.remove(owner_id);
        Ok(())
    }
}

/// In-memory submission repository
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: DashMap<EntityId, Submission>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>, RepositoryError> {
        Ok(self.submissions.get(id).map(|s| s.value().clone()))
    }

    async fn find_by_survey(&self, owner_id: &EntityId) -> Result<Vec<Submission>, RepositoryError> {
        let mut found: Vec<Submission> = self
            .submissions
            .iter()
            .filter(|entry| entry.value().survey_id() == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|s| s.submitted_at());
        Ok(found)
    }

    async fn save(&self, submission: &Submission) -> Result<(), RepositoryError> {
        self.submissions.insert(submission.id().clone(), submission.clone());
        Ok(())
    }
}

/// No-op event publisher
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Event publisher that keeps every published event
#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        let mut recorded = self
            .events
            .lock()
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;
        recorded.extend(events);
        Ok(())
    }
}
