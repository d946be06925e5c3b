//! TaskTrack Persistence Layer
//!
//! Infrastructure layer providing repository implementations for domain
//! entities. This crate implements the repository interfaces defined in
//! `tasktrack-domain`.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Infrastructure Layer            │
//! │  memory/InMemoryTaskRepository           │
//! └─────────────────────────────────────────┘
//!                     ▲ implements
//! ┌─────────────────────────────────────────┐
//! │              Domain Layer                │
//! │  TaskRepository                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tasktrack_persistence::memory::InMemoryTaskRepository;
//! use tasktrack_domain::repositories::TaskRepository;
//! use std::sync::Arc;
//!
//! let repo: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
//! ```

pub mod error;
pub mod memory;

pub use error::PersistenceError;
pub use memory::InMemoryTaskRepository;
