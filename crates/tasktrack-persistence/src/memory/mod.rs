//! In-Memory Repository Implementations
//!
//! Thread-safe in-memory implementations of domain repository interfaces.
//! Suitable for testing and development.

mod task_repository;

pub use task_repository::InMemoryTaskRepository;
