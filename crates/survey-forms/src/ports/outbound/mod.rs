//! Outbound ports (Repository traits)
//!
//! The survey engine does not persist anything itself; hosts plug their
//! storage in behind these traits.

use async_trait::async_trait;
use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{EntityId, SurveySchema};
use crate::domain::DomainEvent;

/// Survey repository port. Surveys are keyed by the entity that owns them
/// (a casting code, a role, a profile template).
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Find the survey attached to `owner_id`
    async fn find(&self, owner_id: &EntityId) -> Result<Option<SurveySchema>, RepositoryError>;

    /// Save survey (insert or replace)
    async fn save(&self, owner_id: &EntityId, schema: &SurveySchema) -> Result<(), RepositoryError>;

    /// Detach the survey from its owner
    async fn delete(&self, owner_id: &EntityId) -> Result<(), RepositoryError>;
}

/// Submission repository port
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Find submission by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>, RepositoryError>;

    /// Every submission made against one survey, oldest first
    async fn find_by_survey(&self, owner_id: &EntityId) -> Result<Vec<Submission>, RepositoryError>;

    /// Save submission
    async fn save(&self, submission: &Submission) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    ConnectionError(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
        }
    }
}
