//! Property-based tests for the status vocabulary and value objects
//!
//! Parsing must normalize case and legacy spacing to canonical tags and
//! reject anything else.

use proptest::prelude::*;
use tasktrack_domain::task::TaskStatus;
use tasktrack_domain::value_objects::*;

fn any_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

/// Re-render a canonical tag with random case and separators
fn legacy_spelling(status: TaskStatus, upper_mask: Vec<bool>, use_space: bool) -> String {
    let separator = if use_space { " " } else { "_" };
    status
        .as_str()
        .split('_')
        .collect::<Vec<_>>()
        .join(separator)
        .chars()
        .zip(upper_mask.into_iter().chain(std::iter::repeat(true)))
        .map(|(c, upper)| {
            if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

// ============================================================================
// TaskStatus Property Tests
// ============================================================================

proptest! {
    /// Canonical tag roundtrip
    #[test]
    fn test_status_canonical_roundtrip(status in any_status()) {
        prop_assert!(TaskStatus::is_valid(status.as_str()));
        prop_assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
    }

    /// Case and spacing variants normalize to the same tag
    #[test]
    fn test_status_legacy_spelling_normalizes(
        status in any_status(),
        mask in prop::collection::vec(any::<bool>(), 0..12),
        use_space in any::<bool>(),
        padding in " {0,3}",
    ) {
        let raw = format!("{}{}{}", padding, legacy_spelling(status, mask, use_space), padding);
        prop_assert_eq!(raw.parse::<TaskStatus>().unwrap(), status);
    }

    /// Unknown words are rejected
    #[test]
    fn test_status_unknown_rejected(word in "[a-z]{1,12}") {
        let known = TaskStatus::all()
            .iter()
            .any(|s| s.as_str().eq_ignore_ascii_case(&word));
        prop_assume!(!known);
        prop_assert!(word.parse::<TaskStatus>().is_err());
    }

    /// JSON roundtrip keeps the canonical tag
    #[test]
    fn test_status_json_roundtrip(status in any_status()) {
        let json = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(json.trim_matches('"'), status.as_str());
        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, status);
    }
}

// ============================================================================
// Identifier Property Tests
// ============================================================================

proptest! {
    /// TaskId roundtrip: to_string -> from_string == original
    #[test]
    fn test_task_id_roundtrip(_dummy in 0u8..1) {
        let id = TaskId::new();
        prop_assert_eq!(TaskId::from_string(&id.to_string()).unwrap(), id);
    }

    /// UserId keeps any non-blank value, trimmed
    #[test]
    fn test_user_id_trimmed(value in "[a-zA-Z0-9-]{1,32}", pad in " {0,4}") {
        let id = UserId::new(format!("{}{}{}", pad, value, pad)).unwrap();
        prop_assert_eq!(id.as_str(), value.as_str());
    }
}
