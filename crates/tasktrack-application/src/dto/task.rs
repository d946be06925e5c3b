//! Task-related DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tasktrack_domain::services::{derive_display_data, TaskAction};
use tasktrack_domain::task::{Task, TaskStatus};

use crate::formatting::{count_label, DateFormatter};

/// Command to create a new task
///
/// Dates are raw client input; see `formatting::parse_date_input`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskCommand {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

/// Command to edit a task; `None` leaves a field untouched
///
/// A blank `deadline` clears the deadline; a blank `status` or
/// `start_date` counts as not provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

/// Task enriched for display (list row and detail view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDisplayDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub owner_id: String,
    pub start_date: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Derived at read time
    pub progress: Option<u8>,
    pub is_overdue: bool,

    // Presentation
    pub status_text: String,
    pub status_class: String,
    pub progress_color: String,
    pub icon: String,
    pub formatted_start_date: String,
    pub formatted_deadline: Option<String>,
    pub formatted_created_at: String,
    pub formatted_updated_at: String,
    pub overdue_message: Option<String>,
    pub available_actions: Vec<TaskAction>,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_complete: bool,
}

impl TaskDisplayDto {
    /// Create from domain entity, evaluated at `now`
    pub fn from_domain(task: &Task, formatter: &DateFormatter, now: DateTime<Utc>) -> Self {
        let dates = formatter.format_task_dates(task);
        let display = derive_display_data(task, dates.clone(), now);

        Self {
            id: task.id().map(|id| id.to_string()).unwrap_or_default(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status(),
            owner_id: task.owner_id().to_string(),
            start_date: task.start_date(),
            deadline: task.deadline(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            progress: task.progress_percentage(now),
            is_overdue: task.is_overdue(now),
            status_text: display.status_text().to_string(),
            status_class: display.status_class().to_string(),
            progress_color: display.progress_color().as_str().to_string(),
            icon: display.icon().to_string(),
            formatted_start_date: dates.start_date,
            formatted_deadline: dates.deadline,
            formatted_created_at: dates.created_at,
            formatted_updated_at: dates.updated_at,
            overdue_message: display.overdue_message().map(str::to_string),
            available_actions: display.available_actions().to_vec(),
            can_edit: display.can_edit(),
            can_delete: display.can_delete(),
            can_complete: display.can_complete(),
        }
    }
}

/// Status filter applied to a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskListFilter {
    /// Every status except CANCELLED
    All,
    /// One status; IN_PROGRESS also covers PENDING
    Status(TaskStatus),
}

impl TaskListFilter {
    /// Statuses a list with this filter draws from
    pub fn statuses(&self) -> Vec<TaskStatus> {
        match self {
            TaskListFilter::All => TaskStatus::all()
                .iter()
                .copied()
                .filter(|s| *s != TaskStatus::Cancelled)
                .collect(),
            TaskListFilter::Status(TaskStatus::InProgress) => {
                vec![TaskStatus::Pending, TaskStatus::InProgress]
            }
            TaskListFilter::Status(status) => vec![*status],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskListFilter::All => "All tasks",
            TaskListFilter::Status(status) => status.label(),
        }
    }

    fn empty_message(&self) -> String {
        match self {
            TaskListFilter::All => "No tasks yet. Create your first task to get started.".into(),
            TaskListFilter::Status(status) => {
                format!("No {} tasks.", status.label().to_lowercase())
            }
        }
    }
}

/// Filter metadata echoed back with a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFilterDto {
    pub status: Option<TaskStatus>,
    pub label: String,
    pub includes: Vec<TaskStatus>,
}

impl From<TaskListFilter> for TaskFilterDto {
    fn from(filter: TaskListFilter) -> Self {
        Self {
            status: match filter {
                TaskListFilter::All => None,
                TaskListFilter::Status(status) => Some(status),
            },
            label: filter.label().to_string(),
            includes: filter.statuses(),
        }
    }
}

/// Task list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListDto {
    pub tasks: Vec<TaskDisplayDto>,
    pub count: usize,
    pub count_label: String,
    pub filter: TaskFilterDto,
    pub empty_message: Option<String>,
}

impl TaskListDto {
    pub fn new(tasks: Vec<TaskDisplayDto>, filter: TaskListFilter) -> Self {
        let count = tasks.len();
        Self {
            empty_message: tasks.is_empty().then(|| filter.empty_message()),
            count_label: count_label(count, "task"),
            count,
            tasks,
            filter: filter.into(),
        }
    }
}
