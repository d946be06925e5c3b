//! Statistics aggregation and insight generation
//!
//! Pure functions over a user's task set. Callers apply the auto-transition
//! pass (and persist it) before counting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

/// Per-status counts for one user
///
/// `total` excludes CANCELLED tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub scheduled: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub overdue: usize,
    pub completion_rate: u8,
}

impl TaskStatistics {
    /// Count tasks at `now`
    pub fn from_tasks<'a, I>(tasks: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut stats = Self::default();

        for task in tasks {
            match task.status() {
                TaskStatus::Cancelled => {
                    stats.cancelled += 1;
                    continue;
                }
                TaskStatus::Scheduled => stats.scheduled += 1,
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Failed => stats.failed += 1,
            }
            stats.total += 1;
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
        }

        stats.completion_rate = completion_rate(stats.completed, stats.total, stats.failed);
        stats
    }

    /// PENDING folded into IN_PROGRESS, as shown to users
    pub fn in_progress_bucket(&self) -> usize {
        self.pending + self.in_progress
    }
}

/// round(completed / (total - failed) * 100), 0 when nothing is left to count
///
/// Failed tasks are excluded from the denominator.
pub fn completion_rate(completed: usize, total: usize, failed: usize) -> u8 {
    let denominator = total.saturating_sub(failed);
    if denominator == 0 {
        return 0;
    }
    let rate = (completed as f64 / denominator as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

/// Insight severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Danger,
    Info,
}

/// Advisory message derived from a statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsInsight {
    kind: InsightKind,
    message: String,
    icon: String,
    priority: u8,
}

impl StatisticsInsight {
    pub fn new(kind: InsightKind, message: impl Into<String>, icon: &str, priority: u8) -> Self {
        Self {
            kind,
            message: message.into(),
            icon: icon.to_string(),
            priority,
        }
    }

    pub fn kind(&self) -> InsightKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }
}

/// Rule-based insights, highest priority first
pub fn generate_insights(stats: &TaskStatistics) -> Vec<StatisticsInsight> {
    if stats.total == 0 {
        return vec![StatisticsInsight::new(
            InsightKind::Info,
            "No tasks yet. Create your first task to get started!",
            "💡",
            1,
        )];
    }

    let mut insights = Vec::new();
    let in_progress = stats.in_progress_bucket();

    if stats.overdue > 0 {
        let message = if stats.overdue == 1 {
            "1 task is overdue. Review it as soon as possible.".to_string()
        } else {
            format!(
                "{} tasks are overdue. Review them as soon as possible.",
                stats.overdue
            )
        };
        insights.push(StatisticsInsight::new(InsightKind::Danger, message, "⚠️", 10));
    }

    if stats.pending > 10 {
        insights.push(StatisticsInsight::new(
            InsightKind::Warning,
            format!(
                "{} tasks are waiting to be started. Consider prioritizing them.",
                stats.pending
            ),
            "📋",
            8,
        ));
    } else if stats.pending >= 5 {
        insights.push(StatisticsInsight::new(
            InsightKind::Info,
            format!("{} tasks are waiting to be started.", stats.pending),
            "📋",
            3,
        ));
    }

    if stats.total >= 5 {
        if stats.completion_rate >= 80 {
            insights.push(StatisticsInsight::new(
                InsightKind::Success,
                format!("Excellent! Your completion rate is {}%.", stats.completion_rate),
                "🏆",
                7,
            ));
        } else if stats.completion_rate >= 50 {
            insights.push(StatisticsInsight::new(
                InsightKind::Success,
                format!("Good progress! Your completion rate is {}%.", stats.completion_rate),
                "👍",
                6,
            ));
        }

        if stats.completion_rate < 30 {
            insights.push(StatisticsInsight::new(
                InsightKind::Warning,
                format!(
                    "Your completion rate is {}%. Try breaking tasks into smaller steps.",
                    stats.completion_rate
                ),
                "📉",
                5,
            ));
        }
    }

    if in_progress > 5 {
        insights.push(StatisticsInsight::new(
            InsightKind::Info,
            format!(
                "{} tasks are in progress. Focusing on fewer at a time may help.",
                in_progress
            ),
            "🔄",
            4,
        ));
    }

    if stats.completed == stats.total {
        insights.push(StatisticsInsight::new(
            InsightKind::Success,
            "All tasks completed! Great work!",
            "🎉",
            9,
        ));
    }

    if stats.overdue == 0 && stats.total >= 3 && in_progress + stats.completed > 0 {
        insights.push(StatisticsInsight::new(
            InsightKind::Success,
            "No overdue tasks. Keep up the good pace!",
            "✨",
            2,
        ));
    }

    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{TaskId, UserId};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn task(status: TaskStatus, deadline: Option<DateTime<Utc>>) -> Task {
        Task::reconstitute(
            TaskId::new(),
            "t".into(),
            String::new(),
            status,
            UserId::new("u").unwrap(),
            now() - Duration::days(30),
            deadline,
            now() - Duration::days(30),
            now() - Duration::days(30),
        )
    }

    fn stats(total: usize, completed: usize, failed: usize) -> TaskStatistics {
        TaskStatistics {
            total,
            completed,
            failed,
            completion_rate: completion_rate(completed, total, failed),
            ..Default::default()
        }
    }

    fn priorities(insights: &[StatisticsInsight]) -> Vec<u8> {
        insights.iter().map(|i| i.priority()).collect()
    }

    #[test]
    fn test_completion_rate_excludes_failed() {
        assert_eq!(completion_rate(4, 10, 2), 50);
        assert_eq!(completion_rate(0, 0, 0), 0);
        assert_eq!(completion_rate(0, 3, 3), 0);
        assert_eq!(completion_rate(2, 3, 0), 67);
    }

    #[test]
    fn test_from_tasks_counts_and_excludes_cancelled() {
        let past = Some(now() - Duration::days(1));
        let tasks = vec![
            task(TaskStatus::Scheduled, None),
            task(TaskStatus::Pending, None),
            task(TaskStatus::InProgress, None),
            task(TaskStatus::Completed, past),
            task(TaskStatus::Failed, past),
            task(TaskStatus::Cancelled, past),
        ];

        let stats = TaskStatistics::from_tasks(&tasks, now());
        assert_eq!(stats.total, 5);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.in_progress_bucket(), 2);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completion_rate, 25);
    }

    #[test]
    fn test_ten_tasks_two_failed_four_completed() {
        let mut tasks = Vec::new();
        tasks.extend((0..4).map(|_| task(TaskStatus::Completed, None)));
        tasks.extend((0..2).map(|_| task(TaskStatus::Failed, None)));
        tasks.extend((0..4).map(|_| task(TaskStatus::InProgress, None)));

        let stats = TaskStatistics::from_tasks(&tasks, now());
        assert_eq!(stats.total, 10);
        assert_eq!(stats.completion_rate, 50);
    }

    #[test]
    fn test_empty_short_circuits() {
        let insights = generate_insights(&TaskStatistics::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind(), InsightKind::Info);
    }

    #[test]
    fn test_overdue_phrasing() {
        let mut s = stats(2, 0, 0);
        s.overdue = 1;
        let insights = generate_insights(&s);
        assert_eq!(insights[0].kind(), InsightKind::Danger);
        assert_eq!(insights[0].priority(), 10);
        assert!(insights[0].message().starts_with("1 task is overdue"));

        s.overdue = 3;
        let insights = generate_insights(&s);
        assert!(insights[0].message().starts_with("3 tasks are overdue"));
    }

    #[test]
    fn test_pending_thresholds() {
        let mut s = stats(20, 0, 0);
        s.pending = 11;
        let insights = generate_insights(&s);
        assert!(insights.iter().any(|i| i.priority() == 8 && i.kind() == InsightKind::Warning));

        s.pending = 5;
        let insights = generate_insights(&s);
        assert!(insights.iter().any(|i| i.priority() == 3 && i.kind() == InsightKind::Info));
        assert!(!insights.iter().any(|i| i.priority() == 8));

        s.pending = 4;
        let insights = generate_insights(&s);
        assert!(!insights.iter().any(|i| i.priority() == 3 || i.priority() == 8));
    }

    #[test]
    fn test_completion_rate_rules() {
        let high = generate_insights(&stats(5, 4, 0));
        assert!(high.iter().any(|i| i.priority() == 7));

        let mid = generate_insights(&stats(10, 5, 0));
        assert!(mid.iter().any(|i| i.priority() == 6));
        assert!(!mid.iter().any(|i| i.priority() == 7));

        let low = generate_insights(&stats(10, 2, 0));
        assert!(low.iter().any(|i| i.priority() == 5 && i.kind() == InsightKind::Warning));

        let small = generate_insights(&stats(4, 0, 0));
        assert!(!small.iter().any(|i| matches!(i.priority(), 5..=7)));
    }

    #[test]
    fn test_all_completed_celebrates() {
        let insights = generate_insights(&stats(5, 5, 0));
        assert_eq!(priorities(&insights), vec![9, 7, 2]);
        assert_eq!(insights[0].message(), "All tasks completed! Great work!");
    }

    #[test]
    fn test_busy_in_progress_bucket() {
        let mut s = stats(6, 0, 0);
        s.pending = 3;
        s.in_progress = 3;
        let insights = generate_insights(&s);
        assert!(insights.iter().any(|i| i.priority() == 4));
    }

    #[test]
    fn test_insights_sorted_descending() {
        let mut s = stats(20, 2, 0);
        s.overdue = 2;
        s.pending = 12;
        s.in_progress = 6;
        let insights = generate_insights(&s);
        let p = priorities(&insights);
        let mut sorted = p.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(p, sorted);
        assert_eq!(p, vec![10, 8, 5, 4]);
    }
}
