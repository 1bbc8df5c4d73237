//! Ports module (Hexagonal Architecture)
//!
//! Interfaces towards the host application and its persistence.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
