//! Task Query Service
//!
//! List and detail views enriched with derived state and display data.

use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use tasktrack_domain::ports::Clock;
use tasktrack_domain::repositories::TaskRepository;
use tasktrack_domain::task::{Task, TaskStatus};
use tasktrack_domain::value_objects::UserId;

use crate::dto::{TaskDisplayDto, TaskListDto, TaskListFilter};
use crate::errors::ApplicationResult;
use crate::events::EventPublisher;
use crate::formatting::DateFormatter;

use super::access::load_owned_task;
use super::auto_transition::AutoTransitionService;

/// Task Query Service
///
/// Reads are not side-effect free: due automatic transitions are applied
/// and persisted before anything is derived.
pub struct TaskQueryService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    repository: Arc<R>,
    transitions: AutoTransitionService<R, E>,
    clock: Arc<C>,
    formatter: DateFormatter,
}

impl<R, E, C> TaskQueryService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    /// Create a new TaskQueryService with injected dependencies
    pub fn new(repository: Arc<R>, events: Arc<E>, clock: Arc<C>, formatter: DateFormatter) -> Self {
        Self {
            transitions: AutoTransitionService::new(Arc::clone(&repository), events),
            repository,
            clock,
            formatter,
        }
    }

    /// Parse a list filter from client input
    ///
    /// Absent, blank or "all" means every status but CANCELLED. Anything
    /// else must name a status (legacy spellings accepted).
    pub fn parse_filter(status: Option<&str>) -> ApplicationResult<TaskListFilter> {
        match status.map(str::trim) {
            None | Some("") => Ok(TaskListFilter::All),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(TaskListFilter::All),
            Some(value) => Ok(TaskListFilter::Status(TaskStatus::from_str(value)?)),
        }
    }

    /// The user's tasks for the list view, newest first
    ///
    /// Tasks fetched under the filter stay in the result even when the
    /// auto-transition pass moves them to another status.
    pub async fn get_task_list_for_display(
        &self,
        user_id: &UserId,
        status: Option<&str>,
    ) -> ApplicationResult<TaskListDto> {
        let filter = Self::parse_filter(status)?;
        let now = self.clock.now();

        let mut tasks = self.fetch(user_id, filter).await?;
        debug!(user_id = %user_id, filter = filter.label(), count = tasks.len(), "Loaded task list");

        self.transitions.apply_all(&mut tasks, now).await?;

        let rows = tasks
            .iter()
            .map(|task| TaskDisplayDto::from_domain(task, &self.formatter, now))
            .collect();

        Ok(TaskListDto::new(rows, filter))
    }

    /// One task for the detail view
    pub async fn get_task_for_display(
        &self,
        task_id: &str,
        user_id: &UserId,
    ) -> ApplicationResult<TaskDisplayDto> {
        let now = self.clock.now();
        let mut task = load_owned_task(self.repository.as_ref(), task_id, user_id).await?;

        self.transitions.apply(&mut task, now).await?;

        Ok(TaskDisplayDto::from_domain(&task, &self.formatter, now))
    }

    async fn fetch(&self, user_id: &UserId, filter: TaskListFilter) -> ApplicationResult<Vec<Task>> {
        let tasks = match filter {
            TaskListFilter::All => self
                .repository
                .find_by_user_id(user_id)
                .await?
                .into_iter()
                .filter(|task| task.status() != TaskStatus::Cancelled)
                .collect(),
            TaskListFilter::Status(TaskStatus::InProgress) => {
                let mut merged = Vec::new();
                for status in filter.statuses() {
                    merged.extend(
                        self.repository
                            .find_by_user_id_and_status(user_id, status)
                            .await?,
                    );
                }
                merged.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
                merged
            }
            TaskListFilter::Status(status) => {
                self.repository
                    .find_by_user_id_and_status(user_id, status)
                    .await?
            }
        };
        Ok(tasks)
    }
}
