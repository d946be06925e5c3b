//! Lazy clock-driven transitions
//!
//! SCHEDULED tasks whose start has arrived become PENDING; open tasks past
//! their deadline become FAILED. Changes are persisted immediately.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use tasktrack_domain::repositories::TaskRepository;
use tasktrack_domain::task::{Task, TaskStatus};

use crate::errors::ApplicationResult;
use crate::events::{ApplicationEvent, EventPublisher};

/// A transition applied by the pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTransition {
    pub task_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Applies and persists due automatic transitions
pub struct AutoTransitionService<R, E>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<E>,
}

impl<R, E> AutoTransitionService<R, E>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
{
    pub fn new(repository: Arc<R>, events: Arc<E>) -> Self {
        Self { repository, events }
    }

    /// Bring one task up to date with `now`
    ///
    /// A scheduled task whose window has also closed goes straight through
    /// PENDING to FAILED and is saved once.
    pub async fn apply(
        &self,
        task: &mut Task,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Option<AutoTransition>> {
        let from = task.status();

        if task.should_transition_to_pending(now) {
            task.update_status(TaskStatus::Pending, now)?;
        }
        if task.should_be_marked_as_failed(now) {
            task.mark_as_failed(now);
        }

        let to = task.status();
        if to == from {
            return Ok(None);
        }

        *task = self.repository.update(task).await?;

        let task_id = task.id().map(|id| id.to_string()).unwrap_or_default();
        info!(task_id = %task_id, from = %from, to = %to, "Task auto-transitioned");

        self.events
            .publish(ApplicationEvent::TaskAutoTransitioned {
                task_id: task_id.clone(),
                from,
                to,
                timestamp: now,
            })
            .await;

        Ok(Some(AutoTransition { task_id, from, to }))
    }

    /// Bring every task up to date with `now`
    pub async fn apply_all(
        &self,
        tasks: &mut [Task],
        now: DateTime<Utc>,
    ) -> ApplicationResult<Vec<AutoTransition>> {
        let mut applied = Vec::new();
        for task in tasks.iter_mut() {
            if let Some(transition) = self.apply(task, now).await? {
                applied.push(transition);
            }
        }
        Ok(applied)
    }
}
