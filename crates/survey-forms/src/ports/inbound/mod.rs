//! Inbound ports (Use case traits)

use async_trait::async_trait;
use crate::application::dto::{SubmissionPayload, SubmissionView};
use crate::domain::aggregates::{SchemaBuilder, Submission};
use crate::domain::value_objects::{EntityId, SurveySchema};
use crate::error::Result;

/// Survey editing, filling and review use cases
#[async_trait]
pub trait SurveyUseCases: Send + Sync {
    /// Open an edit session, seeded with the owner's current survey if any
    async fn start_editing(&self, owner_id: &EntityId) -> Result<SchemaBuilder>;

    /// Save the session's schema for the owner and publish its events
    async fn save_survey(&self, owner_id: &EntityId, builder: &mut SchemaBuilder) -> Result<SurveySchema>;

    /// Get the survey attached to an owner
    async fn get_survey(&self, owner_id: &EntityId) -> Result<SurveySchema>;

    /// Remove the survey attached to an owner
    async fn delete_survey(&self, owner_id: &EntityId) -> Result<()>;

    /// Accept a respondent's answers after checking required questions
    async fn submit(&self, owner_id: &EntityId, payload: SubmissionPayload) -> Result<Submission>;

    /// Formatted, read-only view of one submission
    async fn review_submission(&self, submission_id: &EntityId) -> Result<SubmissionView>;

    /// Formatted views of every submission to an owner's survey
    async fn list_submissions(&self, owner_id: &EntityId) -> Result<Vec<SubmissionView>>;
}
