//! Date rendering and input parsing
//!
//! Formats are chrono strftime patterns, validated once at construction so
//! rendering never fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use tasktrack_domain::services::{is_valid_date_pattern, FormattedDates};
use tasktrack_domain::task::Task;

use crate::errors::{ApplicationError, ApplicationResult};

/// Default pattern for calendar dates
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default pattern for instants
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Naive layouts accepted from forms, interpreted as UTC
const NAIVE_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Renders task timestamps for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    date_format: String,
    datetime_format: String,
}

impl DateFormatter {
    /// Build a formatter, rejecting empty or malformed patterns
    pub fn new(
        date_format: impl Into<String>,
        datetime_format: impl Into<String>,
    ) -> ApplicationResult<Self> {
        let date_format = date_format.into();
        let datetime_format = datetime_format.into();
        validate_pattern("date_format", &date_format)?;
        validate_pattern("datetime_format", &datetime_format)?;
        Ok(Self {
            date_format,
            datetime_format,
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    pub fn format_date(&self, value: DateTime<Utc>) -> String {
        value.format(&self.date_format).to_string()
    }

    pub fn format_datetime(&self, value: DateTime<Utc>) -> String {
        value.format(&self.datetime_format).to_string()
    }

    /// Start and deadline render with the instant pattern, audit stamps as dates
    pub fn format_task_dates(&self, task: &Task) -> FormattedDates {
        FormattedDates {
            start_date: self.format_datetime(task.start_date()),
            deadline: task.deadline().map(|d| self.format_datetime(d)),
            created_at: self.format_date(task.created_at()),
            updated_at: self.format_date(task.updated_at()),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

fn validate_pattern(field: &str, pattern: &str) -> ApplicationResult<()> {
    if is_valid_date_pattern(pattern) {
        Ok(())
    } else {
        Err(ApplicationError::ValidationFailed(format!(
            "{}: invalid date pattern '{}'",
            field, pattern
        )))
    }
}

/// Parse a date submitted by a client
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) and `YYYY-MM-DD`
/// (midnight UTC). Returns `None` for blank or unrecognized input.
pub fn parse_date_input(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in NAIVE_INPUT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// "1 task", "3 tasks"
pub fn count_label(count: usize, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
