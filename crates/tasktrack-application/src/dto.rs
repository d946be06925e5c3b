//! Data Transfer Objects (DTOs) for layer boundary crossing
//!
//! DTOs prevent domain model leakage to the presentation layer.
//! They provide a stable API contract while allowing domain internals to evolve.

pub mod statistics;
pub mod task;

// Re-export commonly used DTOs
pub use statistics::*;
pub use task::*;
