//! Repository interfaces for data persistence
//!
//! These interfaces define the contracts for data access.
//! Implementations are provided by infrastructure crates; the domain layer
//! defines only the traits.

use async_trait::async_trait;

use crate::{
    errors::*,
    task::{Task, TaskStatus},
    value_objects::*,
};

/// Repository for task entities
///
/// Writes are assumed to be serialized per record by the storage layer
/// (last write wins); no optimistic concurrency token is carried.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID
    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>>;

    /// Find every task owned by a user, any status
    async fn find_by_user_id(&self, user_id: &UserId) -> DomainResult<Vec<Task>>;

    /// Find a user's tasks in one status
    async fn find_by_user_id_and_status(
        &self,
        user_id: &UserId,
        status: TaskStatus,
    ) -> DomainResult<Vec<Task>>;

    /// Persist a new task, returning it with its assigned ID
    async fn save(&self, task: &Task) -> DomainResult<Task>;

    /// Persist the current in-memory state of an existing task
    async fn update(&self, task: &Task) -> DomainResult<Task>;

    /// Hard delete, any status; returns whether a record was removed
    async fn delete(&self, id: &TaskId) -> DomainResult<bool>;
}
