//! Application Services
//!
//! Use-case orchestration over the task repository. Every read and write
//! samples the clock once, applies due automatic transitions (persisting
//! them), then works on the corrected tasks.

mod access;
mod auto_transition;
mod statistics_service;
mod task_command_service;
mod task_query_service;

pub use auto_transition::{AutoTransition, AutoTransitionService};
pub use statistics_service::StatisticsService;
pub use task_command_service::TaskCommandService;
pub use task_query_service::TaskQueryService;
