//! Task lifecycle status
//!
//! Normal progression is SCHEDULED -> PENDING -> IN_PROGRESS -> COMPLETED,
//! with FAILED and CANCELLED as terminal side exits. All string handling
//! goes through [`TaskStatus::from_str`], so the rest of the crate only
//! ever sees canonical tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Start date still in the future
    Scheduled,
    /// Start date reached, not yet started
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Deadline passed before completion (system assigned)
    Failed,
    /// Soft deleted
    Cancelled,
}

impl TaskStatus {
    /// Every status, in progression order
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::Scheduled,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Failed,
        TaskStatus::Cancelled,
    ];

    pub fn all() -> &'static [TaskStatus] {
        &Self::ALL
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// True only for an exact canonical tag (no normalization)
    pub fn is_valid(value: &str) -> bool {
        Self::ALL.iter().any(|s| s.as_str() == value)
    }

    /// Parse an optional raw value; a missing value means PENDING
    pub fn from_optional(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) => v.parse(),
            None => Ok(Self::Pending),
        }
    }

    /// COMPLETED, FAILED and CANCELLED take no further automatic transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    /// Accepts any case and legacy spacing ("In Progress", "in-progress").
    /// Empty input defaults to PENDING.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Pending);
        }

        let normalized: String = trimmed
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join("_");

        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation("status", format!("Invalid status: {}", s))
            })
    }
}
