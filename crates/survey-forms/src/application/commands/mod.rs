//! Command handlers
//!
//! Application service that orchestrates survey use cases.

use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::dto::{SubmissionPayload, SubmissionView};
use crate::domain::aggregates::{BuilderError, SchemaBuilder, Submission};
use crate::domain::services::ResponseFormatter;
use crate::domain::value_objects::{EntityId, SurveySchema};
use crate::error::{FormsError, Result};
use crate::ports::inbound::SurveyUseCases;
use crate::ports::outbound::{EventPublisher, SubmissionRepository, SurveyRepository};

/// Survey application service
pub struct SurveyService {
    survey_repo: Arc<dyn SurveyRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SurveyService {
    pub fn new(
        survey_repo: Arc<dyn SurveyRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            survey_repo,
            submission_repo,
            event_publisher,
        }
    }

    fn view(schema: &SurveySchema, submission: &Submission) -> SubmissionView {
        let formatted = ResponseFormatter::new(schema).format_all(submission.responses());
        SubmissionView::new(submission, formatted.entries, formatted.has_unanswered)
    }
}

#[async_trait]
impl SurveyUseCases for SurveyService {
    async fn start_editing(&self, owner_id: &EntityId) -> Result<SchemaBuilder> {
        let builder = match self.survey_repo.find(owner_id).await? {
            Some(existing) => SchemaBuilder::edit(existing),
            None => SchemaBuilder::new(),
        };
        debug!(%owner_id, fields = builder.len(), "edit session started");
        Ok(builder)
    }

    async fn save_survey(&self, owner_id: &EntityId, builder: &mut SchemaBuilder) -> Result<SurveySchema> {
        if !builder.is_editing() {
            return Err(FormsError::Builder(BuilderError::NotEditing));
        }

        // Session stays open until the store succeeds
        let schema = builder.validate()?;
        self.survey_repo.save(owner_id, &schema).await?;

        builder.save().map_err(|e| match e {
            BuilderError::Invalid(errors) => FormsError::InvalidSurvey(errors),
            other => FormsError::Builder(other),
        })?;

        let events = builder.take_events();
        self.event_publisher.publish(events).await?;

        info!(%owner_id, fields = schema.len(), "survey stored");
        Ok(schema)
    }

    async fn get_survey(&self, owner_id: &EntityId) -> Result<SurveySchema> {
        self.survey_repo
            .find(owner_id)
            .await?
            .ok_or_else(|| FormsError::SurveyNotFound(owner_id.clone()))
    }

    async fn delete_survey(&self, owner_id: &EntityId) -> Result<()> {
        self.survey_repo.delete(owner_id).await?;
        Ok(())
    }

    async fn submit(&self, owner_id: &EntityId, payload: SubmissionPayload) -> Result<Submission> {
        let schema = self.get_survey(owner_id).await?;

        let mut responses = payload.survey_responses;
        let dropped = responses.retain_known(&schema);
        if dropped > 0 {
            debug!(%owner_id, dropped, "ignoring answers to unknown questions");
        }
        responses
            .check_required(&schema)
            .map_err(FormsError::IncompleteSubmission)?;

        let mut submission = Submission::create(owner_id.clone(), responses, payload.extra);
        self.submission_repo.save(&submission).await?;

        let events = submission.take_events();
        self.event_publisher.publish(events).await?;

        info!(%owner_id, submission_id = %submission.id(), "submission received");
        Ok(submission)
    }

    async fn review_submission(&self, submission_id: &EntityId) -> Result<SubmissionView> {
        let submission = self
            .submission_repo
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| FormsError::SubmissionNotFound(submission_id.clone()))?;
        let schema = self.get_survey(submission.survey_id()).await?;

        Ok(Self::view(&schema, &submission))
    }

    async fn list_submissions(&self, owner_id: &EntityId) -> Result<Vec<SubmissionView>> {
        let schema = self.get_survey(owner_id).await?;
        let submissions = self.submission_repo.find_by_survey(owner_id).await?;

        Ok(submissions.iter().map(|s| Self::view(&schema, s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FieldPatch, FieldType, ResponseError, ResponseMap};
    use crate::domain::DomainEvent;
    use crate::infrastructure::persistence::{
        InMemorySubmissionRepository, InMemorySurveyRepository, RecordingEventPublisher,
    };
    use crate::ports::outbound::RepositoryError;
    use serde_json::json;

    /// Survey store that is reachable for reads but rejects every write
    struct UnavailableSurveyRepository;

    #[async_trait]
    impl SurveyRepository for UnavailableSurveyRepository {
        async fn find(&self, _owner_id: &EntityId) -> std::result::Result<Option<SurveySchema>, RepositoryError> {
            Ok(None)
        }

        async fn save(&self, _owner_id: &EntityId, _schema: &SurveySchema) -> std::result::Result<(), RepositoryError> {
            Err(RepositoryError::ConnectionError("down".into()))
        }

        async fn delete(&self, _owner_id: &EntityId) -> std::result::Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn service() -> (SurveyService, Arc<RecordingEventPublisher>) {
        let publisher = Arc::new(RecordingEventPublisher::new());
        let service = SurveyService::new(
            Arc::new(InMemorySurveyRepository::new()),
            Arc::new(InMemorySubmissionRepository::new()),
            publisher.clone(),
        );
        (service, publisher)
    }

    async fn seeded(service: &SurveyService, owner: &EntityId) -> SurveySchema {
        let mut builder = service.start_editing(owner).await.unwrap();
        builder.add_field(FieldType::Text).unwrap();
        builder.update_field(0, FieldPatch::label("Name")).unwrap();
        builder.update_field(0, FieldPatch::required(true)).unwrap();
        builder.add_field(FieldType::Radio).unwrap();
        builder.update_field(1, FieldPatch::label("Experience")).unwrap();
        builder.update_option_label(1, 0, "Yes").unwrap();
        builder.add_option(1).unwrap();
        builder.update_option_label(1, 1, "No").unwrap();
        service.save_survey(owner, &mut builder).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_reopen_survey() {
        let (service, publisher) = service();
        let owner = EntityId::from_string("casting-code-7");
        let saved = seeded(&service, &owner).await;

        assert_eq!(service.get_survey(&owner).await.unwrap(), saved);
        let builder = service.start_editing(&owner).await.unwrap();
        assert_eq!(builder.fields(), saved.fields());

        let types: Vec<&str> = publisher.events().iter().map(DomainEvent::event_type).collect();
        assert_eq!(types.first(), Some(&"survey.field_added"));
        assert_eq!(types.last(), Some(&"survey.saved"));
    }

    #[tokio::test]
    async fn test_invalid_survey_not_stored() {
        let (service, _) = service();
        let owner = EntityId::new();
        let mut builder = service.start_editing(&owner).await.unwrap();
        builder.add_field(FieldType::Text).unwrap();

        let err = service.save_survey(&owner, &mut builder).await.unwrap_err();
        assert!(matches!(err, FormsError::InvalidSurvey(_)));
        assert!(matches!(service.get_survey(&owner).await, Err(FormsError::SurveyNotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_store_keeps_session_open() {
        let publisher = Arc::new(RecordingEventPublisher::new());
        let service = SurveyService::new(
            Arc::new(UnavailableSurveyRepository),
            Arc::new(InMemorySubmissionRepository::new()),
            publisher.clone(),
        );
        let owner = EntityId::new();
        let mut builder = service.start_editing(&owner).await.unwrap();
        builder.add_field(FieldType::Text).unwrap();
        builder.update_field(0, FieldPatch::label("Name")).unwrap();

        let err = service.save_survey(&owner, &mut builder).await.unwrap_err();
        assert!(matches!(err, FormsError::Storage(_)));
        assert!(builder.is_editing());
        assert!(publisher.events().is_empty());

        builder.add_field(FieldType::Number).unwrap();
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.cancel(), None);
    }

    #[tokio::test]
    async fn test_save_closed_builder_rejected() {
        let (service, _) = service();
        let owner = EntityId::new();
        seeded(&service, &owner).await;

        let mut builder = service.start_editing(&owner).await.unwrap();
        builder.cancel();
        let err = service.save_survey(&owner, &mut builder).await.unwrap_err();
        assert!(matches!(err, FormsError::Builder(BuilderError::NotEditing)));
    }

    #[tokio::test]
    async fn test_submit_and_review() {
        let (service, _) = service();
        let owner = EntityId::from_string("role-12");
        let schema = seeded(&service, &owner).await;

        let mut responses = ResponseMap::new();
        responses.set(schema.fields[0].id.as_str(), "Jane");
        responses.set(schema.fields[1].id.as_str(), "yes");
        responses.set("stale-question", "ignored");
        let payload = SubmissionPayload::new(responses).with_extra("coverLetter", json!("Hello"));

        let submission = service.submit(&owner, payload).await.unwrap();
        assert_eq!(submission.responses().len(), 2);

        let view = service.review_submission(submission.id()).await.unwrap();
        let lines: Vec<String> = view.answers.iter().map(|a| format!("{}: {}", a.question, a.answer)).collect();
        assert_eq!(lines, vec!["Name: Jane", "Experience: Yes"]);
        assert!(!view.has_unanswered);
        assert_eq!(view.extra.get("coverLetter"), Some(&json!("Hello")));

        assert_eq!(service.list_submissions(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_missing_required() {
        let (service, _) = service();
        let owner = EntityId::new();
        seeded(&service, &owner).await;

        let err = service.submit(&owner, SubmissionPayload::default()).await.unwrap_err();
        let FormsError::IncompleteSubmission(missing) = err else {
            panic!("expected incomplete submission");
        };
        assert_eq!(missing.len(), 1);
        assert!(matches!(&missing[0], ResponseError::MissingRequired { label, .. } if label == "Name"));
    }

    #[tokio::test]
    async fn test_submit_to_unknown_survey() {
        let (service, _) = service();
        let err = service.submit(&EntityId::new(), SubmissionPayload::default()).await.unwrap_err();
        assert!(matches!(err, FormsError::SurveyNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_survey() {
        let (service, _) = service();
        let owner = EntityId::new();
        seeded(&service, &owner).await;

        service.delete_survey(&owner).await.unwrap();
        assert!(service.start_editing(&owner).await.unwrap().is_empty());
    }
}
