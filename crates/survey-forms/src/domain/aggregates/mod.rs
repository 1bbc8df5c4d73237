//! Aggregates module

pub mod builder;
pub mod submission;

pub use builder::{BuilderError, MoveDirection, SchemaBuilder};
pub use submission::Submission;
