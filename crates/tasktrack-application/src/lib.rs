//! TaskTrack Application Layer
//!
//! The Application Layer implements use cases by orchestrating the task
//! entity and the domain display/statistics services. It applies the lazy
//! automatic transitions, persists them, and maps results to DTOs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Services              │ DTOs              │ Ports            │ Events  │
//! │  ─────────             │ ────              │ ─────            │ ──────  │
//! │  TaskQueryService      │ TaskDisplayDto    │ IdentityProvider │ AppEvent│
//! │  StatisticsService     │ TaskListDto       │ EventPublisher   │         │
//! │  TaskCommandService    │ StatisticsDto     │                  │         │
//! │  AutoTransitionService │ Create/UpdateCmd  │                  │         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                     │
//! │  Task entity, Value Objects, Display/Statistics services, Repository    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Responsibilities
//!
//! - **Use Case Orchestration**: load, check ownership, auto-transition, mutate, persist
//! - **Clock Sampling**: one `now` per operation, passed to every derivation
//! - **DTO Mapping**: Convert domain objects to presentation-safe DTOs
//! - **Application Events**: Emit use-case-level events for external consumers
//! - **Error Mapping**: Translate domain errors to application-level errors
//!
//! # Non-Goals
//!
//! - Domain logic (belongs in Domain Layer)
//! - Direct I/O operations (belongs in Infrastructure Layer)
//! - HTTP/CLI handling (belongs in Presentation Layer)

pub mod dto;
pub mod errors;
pub mod events;
pub mod formatting;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{ApplicationEvent, EventPublisher, InMemoryEventPublisher, NoOpEventPublisher};
pub use formatting::DateFormatter;
pub use ports::IdentityProvider;
pub use services::*;
