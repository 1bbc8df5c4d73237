//! Error types for the survey engine

use thiserror::Error;

use crate::domain::aggregates::BuilderError;
use crate::domain::value_objects::{EntityId, ResponseError, ValidationErrors};
use crate::ports::outbound::RepositoryError;

/// Survey engine error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// No survey is attached to the given owner
    #[error("survey not found: {0}")]
    SurveyNotFound(EntityId),

    /// Submission lookup failed
    #[error("submission not found: {0}")]
    SubmissionNotFound(EntityId),

    /// Schema failed validation
    #[error(transparent)]
    InvalidSurvey(#[from] ValidationErrors),

    /// Builder misuse (bad index, edit session closed, ...)
    #[error("builder error: {0}")]
    Builder(#[from] BuilderError),

    /// Required answers are missing from a submission
    #[error("submission incomplete: {} required question(s) unanswered", .0.len())]
    IncompleteSubmission(Vec<ResponseError>),

    /// Persistence collaborator failed
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RepositoryError> for FormsError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for the survey engine
pub type Result<T> = std::result::Result<T, FormsError>;
