use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{TimeTrackingService, TodoService};
use crate::error::{RemoteFetchError, Service, TimerStatusError};
use crate::test_data;
use crate::types::{
    Label, ProjectRecord, RunningEntry, StartTimer, Task, Workspace, WorkspaceId,
};

/// A side-effecting call received by the dev backend. Only tests read them back.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
pub enum DevCall {
    CreateTag {
        name: String,
        workspace_id: WorkspaceId,
    },
    StartTimeEntry(StartTimer),
}

#[derive(Debug, Default)]
struct DevStore {
    workspaces: Vec<Workspace>,
    projects: Vec<ProjectRecord>,
    tags: Vec<(WorkspaceId, String)>,
    labels: Vec<Label>,
    tasks: Vec<Task>,
    running: Option<RunningEntry>,
    calls: Vec<DevCall>,
    fail_start: bool,
    unreachable: bool,
}

/// In-memory stand-in for both services.
#[derive(Debug, Clone, Default)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

impl DevBackend {
    /// Backend seeded with demo data.
    pub fn new() -> Self {
        test_data::seed(Self::empty())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().expect("dev store lock poisoned")
    }

    pub fn with_workspace(self, id: WorkspaceId, name: &str) -> Self {
        self.store().workspaces.push(Workspace {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_project(self, project: ProjectRecord) -> Self {
        self.store().projects.push(project);
        self
    }

    pub fn with_tag(self, workspace_id: WorkspaceId, name: &str) -> Self {
        self.store().tags.push((workspace_id, name.to_string()));
        self
    }

    pub fn with_label(self, id: &str, name: &str) -> Self {
        self.store().labels.push(Label {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_task(self, task: Task) -> Self {
        self.store().tasks.push(task);
        self
    }

    #[cfg(test)]
    pub fn with_running_entry(self, entry: RunningEntry) -> Self {
        self.store().running = Some(entry);
        self
    }

    /// Make every `start_time_entry` call fail.
    #[cfg(test)]
    pub fn failing_start(self) -> Self {
        self.store().fail_start = true;
        self
    }

    /// Make every read fail as if the service were down.
    #[cfg(test)]
    pub fn unreachable(self) -> Self {
        self.store().unreachable = true;
        self
    }

    #[cfg(test)]
    pub fn calls(&self) -> Vec<DevCall> {
        self.store().calls.clone()
    }

    fn check_reachable(&self) -> Result<(), RemoteFetchError> {
        if self.store().unreachable {
            return Err(RemoteFetchError::Response {
                service: Service::Dev,
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TimeTrackingService for DevBackend {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteFetchError> {
        self.check_reachable()?;
        Ok(self.store().workspaces.clone())
    }

    async fn list_projects(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<ProjectRecord>, RemoteFetchError> {
        self.check_reachable()?;
        Ok(self
            .store()
            .projects
            .iter()
            .filter(|p| p.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn list_tags(&self, workspace_id: WorkspaceId) -> Result<Vec<String>, RemoteFetchError> {
        self.check_reachable()?;
        Ok(self
            .store()
            .tags
            .iter()
            .filter(|(ws, _)| *ws == workspace_id)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn create_tag(
        &self,
        name: &str,
        workspace_id: WorkspaceId,
    ) -> Result<(), RemoteFetchError> {
        let mut store = self.store();
        store.tags.push((workspace_id, name.to_string()));
        store.calls.push(DevCall::CreateTag {
            name: name.to_string(),
            workspace_id,
        });
        Ok(())
    }

    async fn current_time_entry(&self) -> Result<RunningEntry, TimerStatusError> {
        self.check_reachable()?;
        self.store()
            .running
            .clone()
            .ok_or(TimerStatusError::NoActiveTimer)
    }

    async fn start_time_entry(&self, request: &StartTimer) -> Result<(), RemoteFetchError> {
        let mut store = self.store();
        if store.fail_start {
            return Err(RemoteFetchError::Response {
                service: Service::Dev,
                message: "500 Internal Server Error".to_string(),
            });
        }

        store.running = Some(RunningEntry {
            project_id: Some(request.project_id),
            description: Some(request.description.clone()).filter(|d| !d.is_empty()),
            start: OffsetDateTime::now_utc(),
        });
        store.calls.push(DevCall::StartTimeEntry(request.clone()));
        Ok(())
    }
}

#[async_trait]
impl TodoService for DevBackend {
    async fn list_labels(&self) -> Result<Vec<Label>, RemoteFetchError> {
        self.check_reachable()?;
        Ok(self.store().labels.clone())
    }

    async fn list_open_tasks(&self) -> Result<Vec<Task>, RemoteFetchError> {
        self.check_reachable()?;
        Ok(self.store().tasks.clone())
    }
}
