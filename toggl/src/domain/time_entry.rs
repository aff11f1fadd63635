use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Name reported to Toggl as the creating application.
pub const CREATED_WITH: &str = "timer-widget";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub workspace_id: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    /// Negative while the entry is running.
    pub duration: i64,
}

impl TimeEntry {
    pub fn is_running(&self) -> bool {
        self.duration < 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartTimeEntry {
    pub created_with: String,
    pub description: String,
    pub tags: Vec<String>,
    pub project_id: i64,
    pub workspace_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    pub duration: i64,
}

impl StartTimeEntry {
    /// A running entry starting now.
    pub fn new(
        workspace_id: i64,
        project_id: i64,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self::starting_at(
            workspace_id,
            project_id,
            description,
            tags,
            OffsetDateTime::now_utc(),
        )
    }

    pub fn starting_at(
        workspace_id: i64,
        project_id: i64,
        description: impl Into<String>,
        tags: Vec<String>,
        start: OffsetDateTime,
    ) -> Self {
        Self {
            created_with: CREATED_WITH.to_string(),
            description: description.into(),
            tags,
            project_id,
            workspace_id,
            // Toggl rejects sub-second precision in `start`.
            start: start.replace_nanosecond(0).unwrap_or(start),
            duration: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn running_entry_from_current_endpoint() {
        let raw = r#"{
            "id": 3544298808,
            "workspace_id": 4567,
            "project_id": 2,
            "description": "Draft chapter",
            "tags": ["Book"],
            "start": "2024-06-28T08:15:00+00:00",
            "duration": -1719562500
        }"#;

        let entry: TimeEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_running());
        assert_eq!(entry.project_id, Some(2));
        assert_eq!(entry.start, datetime!(2024-06-28 08:15:00 UTC));
    }

    #[test]
    fn nothing_running_is_null() {
        let entry: Option<TimeEntry> = serde_json::from_str("null").unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn start_payload_is_a_running_entry() {
        let payload = StartTimeEntry::starting_at(
            4567,
            2,
            "Draft chapter",
            vec!["Book".to_string()],
            datetime!(2024-06-28 08:15:00.250 UTC),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["duration"], -1);
        assert_eq!(json["created_with"], CREATED_WITH);
        assert_eq!(json["start"], "2024-06-28T08:15:00Z");
        assert_eq!(json["tags"][0], "Book");
    }
}
