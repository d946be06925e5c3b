//! Task loading with existence and ownership checks

use tasktrack_domain::repositories::TaskRepository;
use tasktrack_domain::task::Task;
use tasktrack_domain::value_objects::{TaskId, UserId};

use crate::errors::{ApplicationError, ApplicationResult};

/// Load a task the requesting user owns
///
/// Unknown or malformed ids are `TaskNotFound`; another user's task is
/// `Forbidden`.
pub(crate) async fn load_owned_task<R>(
    repository: &R,
    task_id: &str,
    user_id: &UserId,
) -> ApplicationResult<Task>
where
    R: TaskRepository + ?Sized,
{
    let id = TaskId::from_string(task_id)
        .map_err(|_| ApplicationError::TaskNotFound(task_id.to_string()))?;

    let task = repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApplicationError::TaskNotFound(task_id.to_string()))?;

    if !task.is_owned_by(user_id) {
        return Err(ApplicationError::Forbidden(format!(
            "Task {} does not belong to the current user",
            id
        )));
    }

    Ok(task)
}
