use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RemoteFetchError;
use crate::services::{TimeTrackingService, TodoService};
use crate::types::{Project, ProjectId, Task, Workspace};

pub const DEFAULT_PROJECT_COLOR: &str = "#55bcff";

/// Point-in-time data from both services. Never updated in place; refreshing means building a
/// new snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub workspaces: Vec<Workspace>,
    /// Projects of all workspaces, most tracked hours first.
    pub projects: Vec<Project>,
    pub tags: Vec<String>,
    /// Label id -> label name.
    pub labels: BTreeMap<String, String>,
    pub tasks: Vec<Task>,
}

impl CatalogSnapshot {
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Workspace new tags are created in.
    pub fn default_workspace(&self) -> Option<&Workspace> {
        self.workspaces.first()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn label_name(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// A task belongs to a project when one of its labels carries exactly the project's name.
    pub fn is_associated(&self, task: &Task, project: &Project) -> bool {
        task.label_ids
            .iter()
            .filter_map(|id| self.label_name(id))
            .any(|name| name == project.name)
    }

    /// Tasks associated with `project`, sorted by to-do project name, then content.
    pub fn tasks_for(&self, project: &Project) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| self.is_associated(t, project))
            .cloned()
            .collect();

        tasks.sort_by(|a, b| {
            a.project_name
                .cmp(&b.project_name)
                .then_with(|| a.content.cmp(&b.content))
        });
        tasks
    }
}

/// Order projects by (hours, color) descending. Ties keep their fetch order.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| (b.hours, &b.color).cmp(&(a.hours, &a.color)));
}

pub struct RemoteCatalog {
    tracker: Arc<dyn TimeTrackingService>,
    todo: Arc<dyn TodoService>,
    default_color: String,
}

impl RemoteCatalog {
    pub fn new(tracker: Arc<dyn TimeTrackingService>, todo: Arc<dyn TodoService>) -> Self {
        Self {
            tracker,
            todo,
            default_color: DEFAULT_PROJECT_COLOR.to_string(),
        }
    }

    pub fn with_default_color(self, color: impl Into<String>) -> Self {
        Self {
            default_color: color.into(),
            ..self
        }
    }

    /// Fetch a complete snapshot. Any failed call aborts the whole refresh.
    pub async fn refresh(&self) -> Result<CatalogSnapshot, RemoteFetchError> {
        let workspaces = self.tracker.list_workspaces().await?;

        let mut projects = Vec::new();
        for workspace in &workspaces {
            let records = self.tracker.list_projects(workspace.id).await?;
            projects.extend(
                records
                    .into_iter()
                    .map(|r| Project::from_record(r, &self.default_color)),
            );
        }
        sort_projects(&mut projects);

        let mut tags = Vec::new();
        for workspace in &workspaces {
            tags.extend(self.tracker.list_tags(workspace.id).await?);
        }

        let labels = self
            .todo
            .list_labels()
            .await?
            .into_iter()
            .map(|l| (l.id, l.name))
            .collect();

        let tasks = self.todo.list_open_tasks().await?;

        tracing::info!(
            workspaces = workspaces.len(),
            projects = projects.len(),
            tags = tags.len(),
            tasks = tasks.len(),
            "catalog refreshed"
        );

        Ok(CatalogSnapshot {
            workspaces,
            projects,
            tags,
            labels,
            tasks,
        })
    }
}
