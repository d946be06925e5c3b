//! Port interfaces for external services
//!
//! Ports define the contracts for collaborators outside the domain.
//!
//! ## Modules
//!
//! - `clock`: source of the current instant

pub mod clock;

pub use clock::*;
