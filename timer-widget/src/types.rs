use time::OffsetDateTime;

pub type WorkspaceId = i64;
pub type ProjectId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
}

/// A project as the time-tracking service reports it, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub color: Option<String>,
    pub hours: Option<i64>,
}

/// A project with every display field present.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    /// Hex color, e.g. `#55bcff`.
    pub color: String,
    pub hours: i64,
}

impl Project {
    pub fn from_record(record: ProjectRecord, default_color: &str) -> Self {
        Self {
            id: record.id,
            workspace_id: record.workspace_id,
            name: record.name,
            color: record
                .color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default_color.to_string()),
            hours: record.hours.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// An open to-do task.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// Name of the to-do project the task lives in (not a time-tracking project).
    pub project_name: String,
    pub label_ids: Vec<String>,
}

impl Task {
    /// Row text in the task list, e.g. ` #Thesis Outline methods section`.
    pub fn list_label(&self) -> String {
        format!(" #{} {}", self.project_name, self.content)
    }
}

/// The time entry currently running in the time-tracking service.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningEntry {
    pub project_id: Option<ProjectId>,
    pub description: Option<String>,
    pub start: OffsetDateTime,
}

/// Everything needed to start a new time entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTimer {
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub description: String,
    pub tags: Vec<String>,
}
