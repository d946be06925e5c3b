//! Statistics DTOs

use serde::{Deserialize, Serialize};

use tasktrack_domain::services::{InsightKind, StatisticsInsight, TaskStatistics};

use crate::formatting::count_label;

/// One insight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightDto {
    pub kind: InsightKind,
    pub message: String,
    pub icon: String,
    pub priority: u8,
}

impl InsightDto {
    pub fn from_domain(insight: &StatisticsInsight) -> Self {
        Self {
            kind: insight.kind(),
            message: insight.message().to_string(),
            icon: insight.icon().to_string(),
            priority: insight.priority(),
        }
    }
}

/// Counts rendered as labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedStatisticsDto {
    pub total: String,
    pub scheduled: String,
    pub pending: String,
    pub in_progress: String,
    pub completed: String,
    pub failed: String,
    pub overdue: String,
    pub completion_rate: String,
}

/// Statistics view
///
/// `in_progress` is the user-facing bucket and folds PENDING in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsDto {
    pub total: usize,
    pub scheduled: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub overdue: usize,
    pub completion_rate: u8,
    pub formatted: FormattedStatisticsDto,
    pub insights: Vec<InsightDto>,
}

impl StatisticsDto {
    pub fn from_domain(stats: &TaskStatistics, insights: &[StatisticsInsight]) -> Self {
        let in_progress = stats.in_progress_bucket();
        Self {
            total: stats.total,
            scheduled: stats.scheduled,
            pending: stats.pending,
            in_progress,
            completed: stats.completed,
            failed: stats.failed,
            cancelled: stats.cancelled,
            overdue: stats.overdue,
            completion_rate: stats.completion_rate,
            formatted: FormattedStatisticsDto {
                total: count_label(stats.total, "task"),
                scheduled: count_label(stats.scheduled, "task"),
                pending: count_label(stats.pending, "task"),
                in_progress: count_label(in_progress, "task"),
                completed: count_label(stats.completed, "task"),
                failed: count_label(stats.failed, "task"),
                overdue: count_label(stats.overdue, "task"),
                completion_rate: format!("{}%", stats.completion_rate),
            },
            insights: insights.iter().map(InsightDto::from_domain).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktrack_domain::services::generate_insights;

    #[test]
    fn test_statistics_dto_formats_counts() {
        let stats = TaskStatistics {
            total: 10,
            scheduled: 1,
            pending: 2,
            in_progress: 1,
            completed: 5,
            failed: 1,
            cancelled: 3,
            overdue: 1,
            completion_rate: 56,
        };
        let dto = StatisticsDto::from_domain(&stats, &generate_insights(&stats));

        assert_eq!(dto.in_progress, 3);
        assert_eq!(dto.formatted.total, "10 tasks");
        assert_eq!(dto.formatted.overdue, "1 task");
        assert_eq!(dto.formatted.completion_rate, "56%");
        assert!(!dto.insights.is_empty());
        assert!(dto
            .insights
            .windows(2)
            .all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_empty_statistics() {
        let stats = TaskStatistics::default();
        let dto = StatisticsDto::from_domain(&stats, &generate_insights(&stats));
        assert_eq!(dto.formatted.total, "0 tasks");
        assert_eq!(dto.insights.len(), 1);
        assert_eq!(dto.insights[0].kind, InsightKind::Info);
    }
}
