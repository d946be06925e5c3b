//! Statistics Service

use std::sync::Arc;

use tracing::debug;

use tasktrack_domain::ports::Clock;
use tasktrack_domain::repositories::TaskRepository;
use tasktrack_domain::services::{generate_insights, TaskStatistics};
use tasktrack_domain::value_objects::UserId;

use crate::dto::StatisticsDto;
use crate::errors::ApplicationResult;
use crate::events::EventPublisher;

use super::auto_transition::AutoTransitionService;

/// Per-user counts and insights over the auto-transitioned task set
pub struct StatisticsService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    repository: Arc<R>,
    transitions: AutoTransitionService<R, E>,
    clock: Arc<C>,
}

impl<R, E, C> StatisticsService<R, E, C>
where
    R: TaskRepository + Send + Sync,
    E: EventPublisher + Send + Sync,
    C: Clock,
{
    pub fn new(repository: Arc<R>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            transitions: AutoTransitionService::new(Arc::clone(&repository), events),
            repository,
            clock,
        }
    }

    pub async fn get_statistics_for_display(&self, user_id: &UserId) -> ApplicationResult<StatisticsDto> {
        let now = self.clock.now();
        let mut tasks = self.repository.find_by_user_id(user_id).await?;

        self.transitions.apply_all(&mut tasks, now).await?;

        let stats = TaskStatistics::from_tasks(&tasks, now);
        debug!(user_id = %user_id, total = stats.total, overdue = stats.overdue, "Computed statistics");

        Ok(StatisticsDto::from_domain(&stats, &generate_insights(&stats)))
    }
}
