//! Task model for database persistence

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Represents a row of the `tasks` table
///
/// `id` and `created_at` are assigned by the store on insert and never
/// change afterwards. `done` starts out false; nothing in this crate flips
/// it, reads only reflect whatever the table holds.
///
/// # Timestamps
/// SQLite stores `created_at` as an ISO8601 string; it is parsed into a
/// `DateTime<Utc>` when the row is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-generated identifier, strictly increasing in insertion order
    pub id: i64,

    /// Task title
    pub title: String,

    /// Completion flag
    pub done: bool,

    /// Insertion timestamp assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creation timestamp formatted as RFC 3339 with second precision
    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        Task {
            id: 1,
            title: "Buy milk".to_string(),
            done: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn test_created_at_rfc3339() {
        assert_eq!(sample().created_at_rfc3339(), "2024-03-09T14:05:07Z");
    }

    #[test]
    fn test_task_serializes_timestamp_as_rfc3339() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["done"], false);
        assert_eq!(json["created_at"], "2024-03-09T14:05:07Z");
    }
}
