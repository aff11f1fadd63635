use serde::{Deserialize, Serialize};

/// An open task. `labels` holds label names, in the order Todoist reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub project_id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_active_task() {
        let raw = r#"{
            "creator_id": "2671355",
            "created_at": "2019-12-11T22:36:50.000000Z",
            "assignee_id": null,
            "comment_count": 0,
            "is_completed": false,
            "content": "Outline methods section",
            "description": "",
            "due": null,
            "id": "2995104339",
            "labels": ["Research", "Paper"],
            "order": 1,
            "priority": 1,
            "project_id": "2203306141",
            "section_id": null,
            "parent_id": null,
            "url": "https://todoist.com/showTask?id=2995104339"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.content, "Outline methods section");
        assert_eq!(task.labels, vec!["Research", "Paper"]);
        assert!(!task.is_completed);
    }

    #[test]
    fn missing_labels_default_to_empty() {
        let raw = r#"{"id": "1", "content": "Inbox zero", "project_id": "9"}"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.labels.is_empty());
    }
}
