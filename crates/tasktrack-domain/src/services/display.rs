//! Display-data deriver
//!
//! Maps a task's status, its formatted dates, progress and overdue message
//! to presentation facts: label, CSS class tag, progress color band,
//! available actions and capability flags. One factory per status.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

/// True when `pattern` is a non-blank strftime pattern chrono can render
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    !pattern.trim().is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Progress bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    Safe,
    Warning,
    Danger,
    Completed,
}

impl ProgressColor {
    /// Threshold band for a running task: >=80 danger, >=50 warning
    pub fn for_progress(progress: Option<u8>) -> Self {
        match progress {
            Some(p) if p >= 80 => Self::Danger,
            Some(p) if p >= 50 => Self::Warning,
            _ => Self::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Completed => "completed",
        }
    }

    pub fn css_class(&self) -> String {
        format!("progress-{}", self.as_str())
    }
}

/// Action offered to the user for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    View,
    Edit,
    Delete,
    Complete,
}

/// Dates already rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDates {
    pub start_date: String,
    pub deadline: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Presentation facts for one task; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDisplayData {
    status: TaskStatus,
    status_text: String,
    status_class: String,
    progress: Option<u8>,
    progress_color: ProgressColor,
    dates: FormattedDates,
    overdue_message: Option<String>,
    available_actions: Vec<TaskAction>,
    can_edit: bool,
    can_delete: bool,
    can_complete: bool,
    icon: String,
}

struct Capabilities {
    actions: &'static [TaskAction],
    can_edit: bool,
    can_delete: bool,
    can_complete: bool,
    icon: &'static str,
}

impl TaskDisplayData {
    /// Dispatch to the factory for `status`
    pub fn for_status(
        status: TaskStatus,
        dates: FormattedDates,
        progress: Option<u8>,
        overdue_message: Option<String>,
    ) -> Self {
        match status {
            TaskStatus::Scheduled => Self::scheduled(dates, progress, overdue_message),
            TaskStatus::Pending => Self::pending(dates, progress, overdue_message),
            TaskStatus::InProgress => Self::in_progress(dates, progress, overdue_message),
            TaskStatus::Completed => Self::completed(dates, progress, overdue_message),
            TaskStatus::Failed => Self::failed(dates, progress, overdue_message),
            TaskStatus::Cancelled => Self::cancelled(dates, progress, overdue_message),
        }
    }

    pub fn scheduled(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::Scheduled,
            dates,
            progress,
            ProgressColor::Safe,
            overdue,
            Capabilities {
                actions: &[TaskAction::Edit, TaskAction::Delete],
                can_edit: true,
                can_delete: true,
                can_complete: false,
                icon: "📅",
            },
        )
    }

    pub fn pending(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::Pending,
            dates,
            progress,
            ProgressColor::Safe,
            overdue,
            Capabilities {
                actions: &[TaskAction::Edit, TaskAction::Delete, TaskAction::Complete],
                can_edit: true,
                can_delete: true,
                can_complete: true,
                icon: "⏳",
            },
        )
    }

    pub fn in_progress(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::InProgress,
            dates,
            progress,
            ProgressColor::for_progress(progress),
            overdue,
            Capabilities {
                actions: &[TaskAction::Edit, TaskAction::Delete, TaskAction::Complete],
                can_edit: true,
                can_delete: true,
                can_complete: true,
                icon: "🔄",
            },
        )
    }

    pub fn completed(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::Completed,
            dates,
            progress,
            ProgressColor::Completed,
            overdue,
            Capabilities {
                actions: &[TaskAction::View, TaskAction::Delete],
                can_edit: false,
                can_delete: true,
                can_complete: false,
                icon: "✅",
            },
        )
    }

    /// Late completion stays available
    pub fn failed(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::Failed,
            dates,
            progress,
            ProgressColor::Danger,
            overdue,
            Capabilities {
                actions: &[TaskAction::View, TaskAction::Delete, TaskAction::Complete],
                can_edit: false,
                can_delete: true,
                can_complete: true,
                icon: "❌",
            },
        )
    }

    pub fn cancelled(dates: FormattedDates, progress: Option<u8>, overdue: Option<String>) -> Self {
        Self::build(
            TaskStatus::Cancelled,
            dates,
            progress,
            ProgressColor::Safe,
            overdue,
            Capabilities {
                actions: &[TaskAction::View],
                can_edit: false,
                can_delete: false,
                can_complete: false,
                icon: "🚫",
            },
        )
    }

    fn build(
        status: TaskStatus,
        dates: FormattedDates,
        progress: Option<u8>,
        progress_color: ProgressColor,
        overdue_message: Option<String>,
        caps: Capabilities,
    ) -> Self {
        Self {
            status,
            status_text: status.label().to_string(),
            status_class: status_class(status),
            progress,
            progress_color,
            dates,
            overdue_message,
            available_actions: caps.actions.to_vec(),
            can_edit: caps.can_edit,
            can_delete: caps.can_delete,
            can_complete: caps.can_complete,
            icon: caps.icon.to_string(),
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn status_class(&self) -> &str {
        &self.status_class
    }

    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn progress_color(&self) -> ProgressColor {
        self.progress_color
    }

    pub fn dates(&self) -> &FormattedDates {
        &self.dates
    }

    pub fn overdue_message(&self) -> Option<&str> {
        self.overdue_message.as_deref()
    }

    pub fn available_actions(&self) -> &[TaskAction] {
        &self.available_actions
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn can_delete(&self) -> bool {
        self.can_delete
    }

    pub fn can_complete(&self) -> bool {
        self.can_complete
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// CSS class tag, e.g. `status-in-progress`
pub fn status_class(status: TaskStatus) -> String {
    format!("status-{}", status.as_str().to_ascii_lowercase().replace('_', "-"))
}

/// Elapsed-time message at day, hour or minute granularity
pub fn overdue_message(overdue_by: Duration) -> String {
    let days = overdue_by.num_days();
    if days >= 1 {
        return format!("Overdue {} {}", days, plural(days, "day"));
    }
    let hours = overdue_by.num_hours();
    if hours >= 1 {
        return format!("Overdue {} {}", hours, plural(hours, "hour"));
    }
    let minutes = overdue_by.num_minutes().max(1);
    format!("Overdue {} {}", minutes, plural(minutes, "minute"))
}

/// Derive display data for a task at `now`
pub fn derive_display_data(task: &Task, dates: FormattedDates, now: DateTime<Utc>) -> TaskDisplayData {
    let progress = task.progress_percentage(now);
    let overdue = task.overdue_duration(now).map(overdue_message);
    TaskDisplayData::for_status(task.status(), dates, progress, overdue)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{TaskId, UserId};
    use chrono::TimeZone;

    #[test]
    fn test_date_pattern_validity() {
        assert!(is_valid_date_pattern("%Y-%m-%d"));
        assert!(is_valid_date_pattern("%d/%m/%Y %H:%M"));
        assert!(!is_valid_date_pattern("   "));
        assert!(!is_valid_date_pattern("%Q"));
    }

    fn dates() -> FormattedDates {
        FormattedDates {
            start_date: "2025-03-01".into(),
            deadline: Some("2025-03-10".into()),
            created_at: "2025-03-01 09:00".into(),
            updated_at: "2025-03-01 09:00".into(),
        }
    }

    #[test]
    fn test_capability_table() {
        use TaskAction::*;
        let cases = [
            (TaskStatus::Scheduled, vec![Edit, Delete], true, true, false),
            (TaskStatus::Pending, vec![Edit, Delete, Complete], true, true, true),
            (TaskStatus::InProgress, vec![Edit, Delete, Complete], true, true, true),
            (TaskStatus::Completed, vec![View, Delete], false, true, false),
            (TaskStatus::Failed, vec![View, Delete, Complete], false, true, true),
            (TaskStatus::Cancelled, vec![View], false, false, false),
        ];

        for (status, actions, edit, delete, complete) in cases {
            let data = TaskDisplayData::for_status(status, dates(), None, None);
            assert_eq!(data.status(), status);
            assert_eq!(data.available_actions(), actions.as_slice(), "{}", status);
            assert_eq!(data.can_edit(), edit, "{}", status);
            assert_eq!(data.can_delete(), delete, "{}", status);
            assert_eq!(data.can_complete(), complete, "{}", status);
            assert!(!data.icon().is_empty());
        }
    }

    #[test]
    fn test_labels_and_classes() {
        let data = TaskDisplayData::in_progress(dates(), Some(10), None);
        assert_eq!(data.status_text(), "In Progress");
        assert_eq!(data.status_class(), "status-in-progress");
    }

    #[test]
    fn test_progress_color_bands() {
        let color = |p| TaskDisplayData::in_progress(dates(), p, None).progress_color();
        assert_eq!(color(None), ProgressColor::Safe);
        assert_eq!(color(Some(49)), ProgressColor::Safe);
        assert_eq!(color(Some(50)), ProgressColor::Warning);
        assert_eq!(color(Some(79)), ProgressColor::Warning);
        assert_eq!(color(Some(80)), ProgressColor::Danger);

        assert_eq!(TaskDisplayData::pending(dates(), Some(95), None).progress_color(), ProgressColor::Safe);
        assert_eq!(TaskDisplayData::completed(dates(), Some(100), None).progress_color(), ProgressColor::Completed);
        assert_eq!(TaskDisplayData::failed(dates(), Some(100), None).progress_color(), ProgressColor::Danger);
        assert_eq!(ProgressColor::Warning.css_class(), "progress-warning");
    }

    #[test]
    fn test_overdue_message_granularity() {
        assert_eq!(overdue_message(Duration::days(1)), "Overdue 1 day");
        assert_eq!(overdue_message(Duration::days(3) + Duration::hours(5)), "Overdue 3 days");
        assert_eq!(overdue_message(Duration::hours(1)), "Overdue 1 hour");
        assert_eq!(overdue_message(Duration::hours(23)), "Overdue 23 hours");
        assert_eq!(overdue_message(Duration::minutes(5)), "Overdue 5 minutes");
        assert_eq!(overdue_message(Duration::seconds(20)), "Overdue 1 minute");
    }

    #[test]
    fn test_derive_display_data_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap();
        let task = Task::reconstitute(
            TaskId::new(),
            "Report".into(),
            String::new(),
            TaskStatus::Failed,
            UserId::new("u").unwrap(),
            now - Duration::days(10),
            Some(now - Duration::days(2)),
            now - Duration::days(10),
            now - Duration::days(2),
        );

        let data = derive_display_data(&task, dates(), now);
        assert_eq!(data.overdue_message(), Some("Overdue 2 days"));
        assert_eq!(data.progress(), Some(100));
        assert!(data.can_complete());
    }

    #[test]
    fn test_derive_display_data_not_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap();
        let task = Task::reconstitute(
            TaskId::new(),
            "Report".into(),
            String::new(),
            TaskStatus::Completed,
            UserId::new("u").unwrap(),
            now - Duration::days(10),
            Some(now - Duration::days(2)),
            now - Duration::days(10),
            now - Duration::days(2),
        );

        let data = derive_display_data(&task, dates(), now);
        assert_eq!(data.overdue_message(), None);
        assert_eq!(data.progress_color(), ProgressColor::Completed);
    }
}
