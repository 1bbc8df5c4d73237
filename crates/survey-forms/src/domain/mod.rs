//! Domain module
//!
//! Survey schema model, the builder aggregate and the render/format services.

pub mod aggregates;
pub mod value_objects;
pub mod events;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
pub use events::*;
