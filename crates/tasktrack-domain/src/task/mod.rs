//! Task aggregate
//!
//! - `status`: the six-state lifecycle vocabulary
//! - `task`: the Task entity with its transition rules and derived state

mod status;
#[allow(clippy::module_inception)]
mod task;

pub use status::TaskStatus;
pub use task::{Task, TaskUpdate, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
