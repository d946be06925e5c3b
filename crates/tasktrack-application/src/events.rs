//! Application layer events
//!
//! Use-case-level facts for external consumers (audit logs, webhooks).
//! Automatic transitions discovered during reads are published too.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use tasktrack_domain::task::TaskStatus;

/// Application-level event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApplicationEvent {
    /// Task was created
    TaskCreated {
        task_id: String,
        user_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Task fields were edited
    TaskUpdated {
        task_id: String,
        user_id: String,
        timestamp: DateTime<Utc>,
    },

    /// User-driven status change
    TaskStatusChanged {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
        timestamp: DateTime<Utc>,
    },

    /// Clock-driven status change applied during a read
    TaskAutoTransitioned {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
        timestamp: DateTime<Utc>,
    },

    /// Task was soft deleted
    TaskCancelled {
        task_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Task record was removed
    TaskDeleted {
        task_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl ApplicationEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ApplicationEvent::TaskCreated { .. } => "TaskCreated",
            ApplicationEvent::TaskUpdated { .. } => "TaskUpdated",
            ApplicationEvent::TaskStatusChanged { .. } => "TaskStatusChanged",
            ApplicationEvent::TaskAutoTransitioned { .. } => "TaskAutoTransitioned",
            ApplicationEvent::TaskCancelled { .. } => "TaskCancelled",
            ApplicationEvent::TaskDeleted { .. } => "TaskDeleted",
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ApplicationEvent::TaskCreated { timestamp, .. }
            | ApplicationEvent::TaskUpdated { timestamp, .. }
            | ApplicationEvent::TaskStatusChanged { timestamp, .. }
            | ApplicationEvent::TaskAutoTransitioned { timestamp, .. }
            | ApplicationEvent::TaskCancelled { timestamp, .. }
            | ApplicationEvent::TaskDeleted { timestamp, .. } => *timestamp,
        }
    }
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an application event
    async fn publish(&self, event: ApplicationEvent);
}

/// No-op event publisher
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ApplicationEvent) {}
}

/// In-memory event collector for testing
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<ApplicationEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().clone()
    }

    /// Clear collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        self.events.lock().push(event);
    }
}
