//! Task Command Service
//!
//! Create, edit and lifecycle use cases. Each command on an existing task
//! loads it, checks ownership, applies due automatic transitions, mutates
//! through the entity, persists and emits an application event.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use tasktrack_domain::errors::DomainResult;
use tasktrack_domain::ports::Clock;
use tasktrack_domain::repositories::TaskRepository;
use tasktrack_domain::task::{Task, TaskStatus, TaskUpdate};
use tasktrack_domain::value_objects::UserId;

use crate::dto::{CreateTaskCommand, TaskDisplayDto, UpdateTaskCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{ApplicationEvent, EventPublisher};
use crate::formatting::{parse_date_input, DateFormatter};

use super::access::load_owned_task;
use super::auto_transition::AutoTransitionService;

/// Task Command Service
pub struct TaskCommandService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    repository: Arc<R>,
    events: Arc<E>,
    transitions: AutoTransitionService<R, E>,
    clock: Arc<C>,
    formatter: DateFormatter,
}

impl<R, E, C> TaskCommandService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    /// Create a new TaskCommandService with injected dependencies
    pub fn new(repository: Arc<R>, events: Arc<E>, clock: Arc<C>, formatter: DateFormatter) -> Self {
        Self {
            transitions: AutoTransitionService::new(Arc::clone(&repository), Arc::clone(&events)),
            repository,
            events,
            clock,
            formatter,
        }
    }

    /// Create a task owned by `user_id`
    ///
    /// A missing or unreadable start date falls back to now. A blank
    /// deadline means none; an unreadable one is rejected.
    pub async fn create_task(
        &self,
        user_id: &UserId,
        cmd: CreateTaskCommand,
    ) -> ApplicationResult<TaskDisplayDto> {
        let now = self.clock.now();

        let start_date = match cmd.start_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_date_input(raw);
                if parsed.is_none() {
                    warn!(input = raw, "Unreadable start date, defaulting to now");
                }
                parsed
            }
        };
        let deadline = parse_optional_date("deadline", cmd.deadline.as_deref())?;

        let task = Task::create(
            &cmd.title,
            cmd.description.as_deref(),
            user_id.clone(),
            start_date,
            deadline,
            now,
        )?;
        let saved = self.repository.save(&task).await?;
        let task_id = saved.id().map(|id| id.to_string()).unwrap_or_default();

        info!(task_id = %task_id, user_id = %user_id, status = %saved.status(), "Task created");

        self.events
            .publish(ApplicationEvent::TaskCreated {
                task_id,
                user_id: user_id.to_string(),
                timestamp: now,
            })
            .await;

        Ok(TaskDisplayDto::from_domain(&saved, &self.formatter, now))
    }

    /// Edit several fields at once; all-or-nothing
    ///
    /// An empty command returns the task unchanged.
    pub async fn update_task(
        &self,
        task_id: &str,
        user_id: &UserId,
        cmd: UpdateTaskCommand,
    ) -> ApplicationResult<TaskDisplayDto> {
        let changes = TaskUpdate {
            title: cmd.title,
            description: cmd.description,
            status: match cmd.status.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(TaskStatus::from_str(raw)?),
            },
            start_date: match cmd.start_date.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(parse_required_date("start_date", raw)?),
            },
            deadline: match cmd.deadline.as_deref() {
                None => None,
                Some(raw) => Some(parse_optional_date("deadline", Some(raw))?),
            },
        };

        let now = self.clock.now();
        let mut task = self.load(task_id, user_id, now).await?;
        if changes.is_empty() {
            return Ok(TaskDisplayDto::from_domain(&task, &self.formatter, now));
        }

        let from = task.status();
        task.update(changes, now)?;
        let saved = self.repository.update(&task).await?;

        info!(task_id = %task_id, "Task updated");
        self.events
            .publish(ApplicationEvent::TaskUpdated {
                task_id: task_id.to_string(),
                user_id: user_id.to_string(),
                timestamp: now,
            })
            .await;
        self.publish_status_change(task_id, from, saved.status(), now).await;

        Ok(TaskDisplayDto::from_domain(&saved, &self.formatter, now))
    }

    /// General set-status operation
    ///
    /// A missing status value means PENDING.
    pub async fn change_status(
        &self,
        task_id: &str,
        user_id: &UserId,
        status: Option<&str>,
    ) -> ApplicationResult<TaskDisplayDto> {
        let target = TaskStatus::from_optional(status)?;
        self.transition(task_id, user_id, |task, now| task.update_status(target, now))
            .await
    }

    pub async fn start_task(&self, task_id: &str, user_id: &UserId) -> ApplicationResult<TaskDisplayDto> {
        self.transition(task_id, user_id, Task::mark_as_in_progress).await
    }

    pub async fn complete_task(&self, task_id: &str, user_id: &UserId) -> ApplicationResult<TaskDisplayDto> {
        self.transition(task_id, user_id, |task, now| {
            task.mark_as_completed(now);
            Ok(())
        })
        .await
    }

    pub async fn reopen_task(&self, task_id: &str, user_id: &UserId) -> ApplicationResult<TaskDisplayDto> {
        self.transition(task_id, user_id, Task::reopen).await
    }

    /// Soft delete; the record is kept with status CANCELLED
    pub async fn cancel_task(&self, task_id: &str, user_id: &UserId) -> ApplicationResult<TaskDisplayDto> {
        self.transition(task_id, user_id, |task, now| {
            task.cancel_task(now);
            Ok(())
        })
        .await
    }

    /// Remove the record entirely
    pub async fn delete_task(&self, task_id: &str, user_id: &UserId) -> ApplicationResult<()> {
        let task = load_owned_task(self.repository.as_ref(), task_id, user_id).await?;
        let id = task
            .id()
            .ok_or_else(|| ApplicationError::TaskNotFound(task_id.to_string()))?;

        if !self.repository.delete(&id).await? {
            return Err(ApplicationError::TaskNotFound(task_id.to_string()));
        }

        info!(task_id = %task_id, "Task deleted");
        self.events
            .publish(ApplicationEvent::TaskDeleted {
                task_id: task_id.to_string(),
                timestamp: self.clock.now(),
            })
            .await;

        Ok(())
    }

    async fn load(&self, task_id: &str, user_id: &UserId, now: DateTime<Utc>) -> ApplicationResult<Task> {
        let mut task = load_owned_task(self.repository.as_ref(), task_id, user_id).await?;
        self.transitions.apply(&mut task, now).await?;
        Ok(task)
    }

    async fn transition<F>(&self, task_id: &str, user_id: &UserId, op: F) -> ApplicationResult<TaskDisplayDto>
    where
        F: FnOnce(&mut Task, DateTime<Utc>) -> DomainResult<()>,
    {
        let now = self.clock.now();
        let mut task = self.load(task_id, user_id, now).await?;

        let from = task.status();
        op(&mut task, now)?;
        if task.status() == from {
            return Ok(TaskDisplayDto::from_domain(&task, &self.formatter, now));
        }

        let saved = self.repository.update(&task).await?;
        self.publish_status_change(task_id, from, saved.status(), now).await;

        Ok(TaskDisplayDto::from_domain(&saved, &self.formatter, now))
    }

    async fn publish_status_change(&self, task_id: &str, from: TaskStatus, to: TaskStatus, now: DateTime<Utc>) {
        if from == to {
            return;
        }
        info!(task_id = %task_id, from = %from, to = %to, "Task status changed");
        self.events
            .publish(ApplicationEvent::TaskStatusChanged {
                task_id: task_id.to_string(),
                from,
                to,
                timestamp: now,
            })
            .await;

        if to == TaskStatus::Cancelled {
            self.events
                .publish(ApplicationEvent::TaskCancelled {
                    task_id: task_id.to_string(),
                    timestamp: now,
                })
                .await;
        }
    }
}

fn parse_required_date(field: &str, raw: &str) -> ApplicationResult<DateTime<Utc>> {
    parse_date_input(raw).ok_or_else(|| {
        ApplicationError::ValidationFailed(format!("{}: Invalid date format '{}'", field, raw.trim()))
    })
}

/// Blank means "no date"
fn parse_optional_date(field: &str, raw: Option<&str>) -> ApplicationResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_required_date(field, value).map(Some),
    }
}
