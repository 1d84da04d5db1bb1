use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage-assigned row identifier of an active task.
pub type TaskId = i64;

/// Timestamp layout used in the database and in the edit fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of significant characters in a stored timestamp. Older databases
/// carry fractional-second suffixes; everything past this is ignored.
pub const TIMESTAMP_LEN: usize = 19;

/// An active task. `title` and `description` are non-empty for as long as
/// the row exists; the store rejects writes that would break that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row id in the `tasks` table.
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Absolute local timestamp the task should be done by.
    pub deadline: NaiveDateTime,
}

/// A task moved to the archive. Immutable once created; the active row it
/// came from no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedTask {
    pub title: String,
    pub description: String,
    /// When the task was marked finished.
    pub completed_at: NaiveDateTime,
}

/// Unvalidated user input for the create and edit accept paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
}

impl TaskFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
        }
    }
}

/// Parse a stored timestamp, honoring only the first 19 characters.
pub fn parse_timestamp(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    // A value short enough, or malformed enough to not slice cleanly, goes
    // to the parser as-is and fails there.
    let significant = raw.get(..TIMESTAMP_LEN).unwrap_or(raw);
    NaiveDateTime::parse_from_str(significant, TIMESTAMP_FORMAT)
}

/// Format a timestamp for storage.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_timestamp_exact() {
        assert_eq!(
            parse_timestamp("2024-03-01 12:30:00").unwrap(),
            ts("2024-03-01 12:30:00")
        );
    }

    #[test]
    fn test_parse_timestamp_ignores_suffix() {
        // Rows written by older builds carry microseconds.
        assert_eq!(
            parse_timestamp("2024-03-01 12:30:00.482913").unwrap(),
            ts("2024-03-01 12:30:00")
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("not a timestamp").is_err());
        assert!(parse_timestamp("2024-03-01").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let original = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(original)).unwrap(), original);
    }
}
