//! TaskTrack Domain Layer
//!
//! Core entities and lifecycle rules for personal task tracking.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  task/          │ services/          │ repositories │ ports   │
//! │  TaskStatus     │ display deriver    │ TaskRepo     │ Clock   │
//! │  Task           │ statistics         │              │         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The entity exposes pure, clock-parameterised predicates
//! (`should_transition_to_pending`, `should_be_marked_as_failed`);
//! orchestration code owns the "check, mutate, persist" loop.

pub mod errors;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod task;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
pub use task::{Task, TaskStatus, TaskUpdate};
pub use value_objects::{TaskId, UserId};
