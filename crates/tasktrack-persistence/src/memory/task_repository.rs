//! In-Memory Task Repository Implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use tasktrack_domain::{
    errors::DomainResult,
    repositories::TaskRepository,
    task::{Task, TaskStatus},
    value_objects::{TaskId, UserId},
};

use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of TaskRepository
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Stores cloned Task instances to maintain isolation. Queries return
/// newest-first by creation time.
///
/// # Example
///
/// ```ignore
/// use tasktrack_persistence::memory::InMemoryTaskRepository;
/// use std::sync::Arc;
///
/// let repo = Arc::new(InMemoryTaskRepository::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    /// Create a new empty in-memory task repository
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Create with already-identified tasks (useful for testing)
    ///
    /// Tasks without an ID are skipped.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let map: HashMap<TaskId, Task> = tasks
            .into_iter()
            .filter_map(|t| t.id().map(|id| (id, t)))
            .collect();
        Self {
            tasks: RwLock::new(map),
        }
    }

    /// Get the current count of tasks (for testing)
    pub fn count(&self) -> usize {
        self.tasks.read().len()
    }

    /// Clear all tasks (for testing)
    pub fn clear(&self) {
        self.tasks.write().clear();
    }

    fn collect_sorted<F>(&self, predicate: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        let tasks = self.tasks.read();
        let mut found: Vec<Task> = tasks.values().filter(|t| predicate(*t)).cloned().collect();
        found.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().map(|id| id.as_uuid()).cmp(&b.id().map(|id| id.as_uuid())))
        });
        found
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        debug!("Finding task by id: {}", id);
        let tasks = self.tasks.read();
        Ok(tasks.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> DomainResult<Vec<Task>> {
        debug!("Finding tasks for user: {}", user_id);
        Ok(self.collect_sorted(|t| t.is_owned_by(user_id)))
    }

    async fn find_by_user_id_and_status(
        &self,
        user_id: &UserId,
        status: TaskStatus,
    ) -> DomainResult<Vec<Task>> {
        debug!("Finding {} tasks for user: {}", status, user_id);
        Ok(self.collect_sorted(|t| t.is_owned_by(user_id) && t.status() == status))
    }

    async fn save(&self, task: &Task) -> DomainResult<Task> {
        if let Some(id) = task.id() {
            return Err(PersistenceError::AlreadyPersisted {
                entity_type: "Task",
                id: id.to_string(),
            }
            .into());
        }

        let id = TaskId::new();
        let stored = Task::reconstitute(
            id,
            task.title().to_string(),
            task.description().to_string(),
            task.status(),
            task.owner_id().clone(),
            task.start_date(),
            task.deadline(),
            task.created_at(),
            task.updated_at(),
        );

        debug!("Saving task {} for user {}", id, task.owner_id());
        self.tasks.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> DomainResult<Task> {
        let id = task.id().ok_or(PersistenceError::NotPersisted("Task"))?;

        let mut tasks = self.tasks.write();
        match tasks.get_mut(&id) {
            Some(existing) => {
                debug!("Updating task {} ({})", id, task.status());
                *existing = task.clone();
                Ok(task.clone())
            }
            None => Err(PersistenceError::not_found("Task", id.to_string()).into()),
        }
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<bool> {
        debug!("Deleting task: {}", id);
        Ok(self.tasks.write().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tasktrack_domain::errors::DomainError;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn create_test_task(title: &str, owner: &str) -> Task {
        Task::create(title, None, user(owner), None, None, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let repo = InMemoryTaskRepository::new();
        let task = create_test_task("first", "alice");
        assert!(task.id().is_none());

        let saved = repo.save(&task).await.unwrap();
        let id = saved.id().unwrap();

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title(), "first");
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_save_twice_rejected() {
        let repo = InMemoryTaskRepository::new();
        let saved = repo.save(&create_test_task("t", "alice")).await.unwrap();
        let err = repo.save(&saved).await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence { .. }));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.find_by_id(&TaskId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_user_and_status() {
        let repo = InMemoryTaskRepository::new();
        repo.save(&create_test_task("a1", "alice")).await.unwrap();
        let mut second = repo.save(&create_test_task("a2", "alice")).await.unwrap();
        repo.save(&create_test_task("b1", "bob")).await.unwrap();

        second.mark_as_in_progress(Utc::now()).unwrap();
        repo.update(&second).await.unwrap();

        assert_eq!(repo.find_by_user_id(&user("alice")).await.unwrap().len(), 2);
        let in_progress = repo
            .find_by_user_id_and_status(&user("alice"), TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].title(), "a2");
    }

    #[tokio::test]
    async fn test_results_newest_first() {
        let now = Utc::now();
        let older = Task::create("older", None, user("alice"), None, None, now - Duration::hours(1)).unwrap();
        let newer = Task::create("newer", None, user("alice"), None, None, now).unwrap();

        let repo = InMemoryTaskRepository::new();
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let titles: Vec<String> = repo
            .find_by_user_id(&user("alice"))
            .await
            .unwrap()
            .iter()
            .map(|t| t.title().to_string())
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_update_unsaved_task_fails() {
        let repo = InMemoryTaskRepository::new();
        let err = repo.update(&create_test_task("t", "alice")).await.unwrap_err();
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
    }

    #[tokio::test]
    async fn test_update_missing_task_not_found() {
        let repo = InMemoryTaskRepository::new();
        let saved = repo.save(&create_test_task("t", "alice")).await.unwrap();
        repo.clear();

        let err = repo.update(&saved).await.unwrap_err();
        assert!(matches!(err, DomainError::EntityNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryTaskRepository::new();
        let saved = repo.save(&create_test_task("t", "alice")).await.unwrap();
        let id = saved.id().unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_with_initial_tasks() {
        let seeded = Task::reconstitute(
            TaskId::new(),
            "seeded".into(),
            String::new(),
            TaskStatus::Pending,
            user("alice"),
            Utc::now(),
            None,
            Utc::now(),
            Utc::now(),
        );
        let repo = InMemoryTaskRepository::with_tasks(vec![seeded, create_test_task("unsaved", "alice")]);
        assert_eq!(repo.count(), 1);
    }
}
