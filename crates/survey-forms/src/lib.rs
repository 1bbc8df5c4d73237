//! Survey Forms
//!
//! Schema-driven survey engine used by casting calls and role applications.
//! Studios describe a survey as an ordered list of typed questions, talent
//! fills it in, and reviewers read the answers back.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field/survey value objects, the `SchemaBuilder`
//!   aggregate, the renderer and formatter services, domain events
//! - **Application Layer**: `SurveyService` orchestrating edit, submit and
//!   review use cases, DTOs crossing the host boundary
//! - **Ports Layer**: repository and event publisher interfaces
//! - **Infrastructure Layer**: in-memory adapters
//!
//! ## Flow
//!
//! `SchemaBuilder` produces a `SurveySchema`, the host persists it, and later
//! hands it to `FormRenderer` (to collect a `ResponseMap`) or to
//! `ResponseFormatter` (to display one).

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;
pub mod error;

// Re-exports for convenience
pub use domain::aggregates::{BuilderError, MoveDirection, SchemaBuilder, Submission};
pub use domain::events::{DomainEvent, SubmissionEvent, SurveyEvent};
pub use domain::services::{
    render_text, Choice, DisplayLayout, FormRenderer, FormSession, FormattedEntry,
    FormattedResponses, RenderedField, RenderedInput, ResponseFormatter,
};
pub use domain::value_objects::{
    derive_option_value, AnswerValue, EntityId, FieldOption, FieldPatch, FieldSchema, FieldType,
    ResponseError, ResponseMap, SchemaError, SurveySchema, ValidationErrors,
};
pub use application::{SubmissionPayload, SubmissionView, SurveyService};
pub use ports::inbound::SurveyUseCases;
pub use ports::outbound::{EventPublisher, RepositoryError, SubmissionRepository, SurveyRepository};
pub use error::{FormsError, Result};
