//! Task entity
//!
//! Owns every lifecycle rule: construction and validation, manual status
//! transitions, the automatic-transition predicates, and the time-based
//! derived state (progress, overdue). Time-dependent reads take `now`
//! explicitly so a caller can sample the clock once per operation.
//! The entity never persists itself.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{TaskId, UserId};

use super::status::TaskStatus;

/// Maximum title length, in characters, after trimming
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length, in characters, after trimming
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// One unit of work owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the repository on first save
    id: Option<TaskId>,

    /// 1-200 chars, trimmed
    title: String,

    /// 0-1000 chars, trimmed
    description: String,

    status: TaskStatus,

    /// Immutable after creation
    owner_id: UserId,

    start_date: DateTime<Utc>,

    /// When present, never earlier than `start_date`
    deadline: Option<DateTime<Utc>>,

    created_at: DateTime<Utc>,

    updated_at: DateTime<Utc>,
}

/// Field changes for [`Task::update`]; `None` leaves a field untouched
///
/// `deadline: Some(None)` clears the deadline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.deadline.is_none()
    }
}

impl Task {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a new task with invariant validation
    ///
    /// A missing start date defaults to `now`. The initial status is
    /// SCHEDULED when the start date is strictly after `now`, otherwise PENDING.
    ///
    /// # Errors
    /// `ValidationError` for a blank or over-long title, an over-long
    /// description, or a deadline before the start date.
    pub fn create(
        title: &str,
        description: Option<&str>,
        owner_id: UserId,
        start_date: Option<DateTime<Utc>>,
        deadline: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = Self::validate_title(title)?;
        let description = Self::validate_description(description.unwrap_or(""))?;
        let start_date = start_date.unwrap_or(now);
        if let Some(deadline) = deadline {
            Self::validate_deadline(start_date, deadline)?;
        }

        let status = if start_date > now {
            TaskStatus::Scheduled
        } else {
            TaskStatus::Pending
        };

        Ok(Self {
            id: None,
            title,
            description,
            status,
            owner_id,
            start_date,
            deadline,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a task from persistence
    ///
    /// Trusted input only: bypasses validation and normalization since the
    /// data was validated when it was first written. Meant for repository
    /// implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TaskId,
        title: String,
        description: String,
        status: TaskStatus,
        owner_id: UserId,
        start_date: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            description,
            status,
            owner_id,
            start_date,
            deadline,
            created_at,
            updated_at,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    // ========================================================================
    // Field mutation
    // ========================================================================

    pub fn update_title(&mut self, title: &str, now: DateTime<Utc>) -> DomainResult<()> {
        self.set_title(title)?;
        self.touch(now);
        Ok(())
    }

    pub fn update_description(&mut self, description: &str, now: DateTime<Utc>) -> DomainResult<()> {
        self.set_description(description)?;
        self.touch(now);
        Ok(())
    }

    /// Rejected when the new start date falls after an existing deadline
    pub fn update_start_date(&mut self, start_date: DateTime<Utc>, now: DateTime<Utc>) -> DomainResult<()> {
        self.set_start_date(start_date)?;
        self.touch(now);
        Ok(())
    }

    /// `None` clears the deadline
    pub fn update_deadline(&mut self, deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DomainResult<()> {
        self.set_deadline(deadline)?;
        self.touch(now);
        Ok(())
    }

    /// General set-status operation, constrained by the manual transition table
    ///
    /// # Business Rules
    /// - Only PENDING, IN_PROGRESS and COMPLETED can be targeted
    /// - FAILED is system-assigned, CANCELLED has [`Task::cancel_task`]
    /// - COMPLETED cannot go straight back to PENDING
    /// - A FAILED task can only be completed (late completion)
    pub fn update_status(&mut self, status: TaskStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.set_status(status)?;
        self.touch(now);
        Ok(())
    }

    /// Apply the provided fields in order: title, description, status,
    /// start date, deadline. Each goes through its validated setter; the
    /// update is all-or-nothing and bumps `updated_at` once.
    pub fn update(&mut self, changes: TaskUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(title) = changes.title.as_deref() {
            next.set_title(title)?;
        }
        if let Some(description) = changes.description.as_deref() {
            next.set_description(description)?;
        }
        if let Some(status) = changes.status {
            next.set_status(status)?;
        }
        if let Some(start_date) = changes.start_date {
            next.set_start_date(start_date)?;
        }
        if let Some(deadline) = changes.deadline {
            next.set_deadline(deadline)?;
        }

        next.touch(now);
        *self = next;
        Ok(())
    }

    /// Whether the general set-status operation would accept `target`
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        Self::check_manual_transition(self.status, target).is_ok()
    }

    // ========================================================================
    // Dedicated lifecycle operations
    // ========================================================================

    /// Start work; allowed from anything but COMPLETED
    pub fn mark_as_in_progress(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == TaskStatus::Completed {
            return Err(DomainError::rule("Cannot restart a completed task"));
        }
        self.status = TaskStatus::InProgress;
        self.touch(now);
        Ok(())
    }

    /// Complete from any state, FAILED included (late completion)
    pub fn mark_as_completed(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.touch(now);
    }

    /// Move to FAILED; no-op when already COMPLETED or FAILED
    ///
    /// Does not look at the deadline: callers check
    /// [`Task::should_be_marked_as_failed`] first.
    pub fn mark_as_failed(&mut self, now: DateTime<Utc>) {
        if matches!(self.status, TaskStatus::Completed | TaskStatus::Failed) {
            return;
        }
        self.status = TaskStatus::Failed;
        self.touch(now);
    }

    /// COMPLETED goes back to IN_PROGRESS, anything else but FAILED to PENDING
    pub fn reopen(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.status = match self.status {
            TaskStatus::Failed => {
                return Err(DomainError::rule(
                    "Cannot reopen a failed task; create a new one instead",
                ))
            }
            TaskStatus::Completed => TaskStatus::InProgress,
            _ => TaskStatus::Pending,
        };
        self.touch(now);
        Ok(())
    }

    /// Soft delete; no-op when already CANCELLED
    pub fn cancel_task(&mut self, now: DateTime<Utc>) {
        if self.status == TaskStatus::Cancelled {
            return;
        }
        self.status = TaskStatus::Cancelled;
        self.touch(now);
    }

    // ========================================================================
    // Automatic-transition predicates
    // ========================================================================

    /// SCHEDULED and the start date has been reached
    pub fn should_transition_to_pending(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Scheduled && now >= self.start_date
    }

    /// Deadline passed while still open
    pub fn should_be_marked_as_failed(&self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) => !self.status.is_terminal() && now > deadline,
            None => false,
        }
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Elapsed share of the start..deadline window, 0-100
    ///
    /// `None` without a deadline. COMPLETED, or `now` at/after the
    /// deadline, reports 100.
    pub fn progress_percentage(&self, now: DateTime<Utc>) -> Option<u8> {
        let deadline = self.deadline?;

        if self.status == TaskStatus::Completed || now >= deadline {
            return Some(100);
        }
        if now <= self.start_date {
            return Some(0);
        }

        let total = (deadline - self.start_date).num_milliseconds() as f64;
        let elapsed = (now - self.start_date).num_milliseconds() as f64;
        if total <= 0.0 {
            return Some(100);
        }

        let ratio = (elapsed / total).clamp(0.0, 1.0);
        Some((ratio * 100.0).round() as u8)
    }

    /// Past the deadline and not COMPLETED
    ///
    /// FAILED and CANCELLED tasks with a past deadline still report true.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) => self.status != TaskStatus::Completed && now > deadline,
            None => false,
        }
    }

    /// How long the task has been overdue, if it is
    pub fn overdue_duration(&self, now: DateTime<Utc>) -> Option<Duration> {
        if !self.is_overdue(now) {
            return None;
        }
        self.deadline.map(|deadline| now - deadline)
    }

    // ========================================================================
    // Setters without timestamp bump
    // ========================================================================

    fn set_title(&mut self, title: &str) -> DomainResult<()> {
        self.title = Self::validate_title(title)?;
        Ok(())
    }

    fn set_description(&mut self, description: &str) -> DomainResult<()> {
        self.description = Self::validate_description(description)?;
        Ok(())
    }

    fn set_status(&mut self, status: TaskStatus) -> DomainResult<()> {
        Self::check_manual_transition(self.status, status)?;
        self.status = status;
        Ok(())
    }

    fn set_start_date(&mut self, start_date: DateTime<Utc>) -> DomainResult<()> {
        if let Some(deadline) = self.deadline {
            if start_date > deadline {
                return Err(DomainError::validation(
                    "start_date",
                    "Start date cannot be after the deadline",
                ));
            }
        }
        self.start_date = start_date;
        Ok(())
    }

    fn set_deadline(&mut self, deadline: Option<DateTime<Utc>>) -> DomainResult<()> {
        if let Some(deadline) = deadline {
            Self::validate_deadline(self.start_date, deadline)?;
        }
        self.deadline = deadline;
        Ok(())
    }

    /// Single post-mutation step for every state change
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_manual_transition(from: TaskStatus, to: TaskStatus) -> DomainResult<()> {
        match to {
            TaskStatus::Failed => {
                return Err(DomainError::rule(
                    "Failed status can only be assigned by the system",
                ))
            }
            TaskStatus::Cancelled => {
                return Err(DomainError::rule(
                    "Cancelled status cannot be set directly; cancel the task instead",
                ))
            }
            TaskStatus::Scheduled => {
                return Err(DomainError::rule(
                    "Scheduled status is derived from the start date and cannot be set directly",
                ))
            }
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Completed => {}
        }

        if from == TaskStatus::Failed && to != TaskStatus::Completed {
            return Err(DomainError::rule(
                "A failed task can only be completed",
            ));
        }

        if from == TaskStatus::Completed && to == TaskStatus::Pending {
            return Err(DomainError::rule(
                "A completed task cannot go back to pending; move it to in progress first",
            ));
        }

        Ok(())
    }

    fn validate_title(title: &str) -> DomainResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Title is required"));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::validation(
                "title",
                format!("Title must be {} characters or less", TITLE_MAX_CHARS),
            ));
        }
        Ok(title.to_string())
    }

    fn validate_description(description: &str) -> DomainResult<String> {
        let description = description.trim();
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(DomainError::validation(
                "description",
                format!(
                    "Description must be {} characters or less",
                    DESCRIPTION_MAX_CHARS
                ),
            ));
        }
        Ok(description.to_string())
    }

    fn validate_deadline(start_date: DateTime<Utc>, deadline: DateTime<Utc>) -> DomainResult<()> {
        if deadline < start_date {
            return Err(DomainError::validation(
                "deadline",
                "Deadline cannot be before the start date",
            ));
        }
        Ok(())
    }
}
