use std::time::Duration;

use async_trait::async_trait;
use toggl::{
    domain::{Project, StartTimeEntry, TimeEntry},
    Credentials, TogglClient,
};

use super::{with_deadline, TimeTrackingService};
use crate::error::{RemoteFetchError, Service, TimerStatusError};
use crate::types::{ProjectRecord, RunningEntry, StartTimer, Workspace, WorkspaceId};

const SERVICE: Service = Service::Toggl;

pub struct TogglService {
    client: TogglClient,
    timeout: Duration,
}

impl TogglService {
    pub fn new(credentials: Credentials, base_url: &str, timeout: Duration) -> Self {
        let client = TogglClient::new(credentials)
            .with_base_url(base_url)
            .with_timeout(timeout);

        Self { client, timeout }
    }
}

#[async_trait]
impl TimeTrackingService for TogglService {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, async {
            let workspaces = self.client.fetch_workspaces().await?;
            Ok::<_, RemoteFetchError>(workspaces
                .into_iter()
                .map(|w| Workspace {
                    id: w.id,
                    name: w.name,
                })
                .collect())
        })
        .await
    }

    async fn list_projects(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<ProjectRecord>, RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, async {
            let projects = self.client.fetch_workspace_projects(workspace_id).await?;
            Ok::<_, RemoteFetchError>(project_records(projects))
        })
        .await
    }

    async fn list_tags(&self, workspace_id: WorkspaceId) -> Result<Vec<String>, RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, async {
            let tags = self.client.fetch_workspace_tags(workspace_id).await?;
            Ok::<_, RemoteFetchError>(tags.into_iter().map(|t| t.name).collect())
        })
        .await
    }

    async fn create_tag(
        &self,
        name: &str,
        workspace_id: WorkspaceId,
    ) -> Result<(), RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, async {
            let tag = self.client.create_tag(workspace_id, name).await?;
            tracing::info!(tag = %tag.name, workspace_id, "created tag");
            Ok::<_, RemoteFetchError>(())
        })
        .await
    }

    async fn current_time_entry(&self) -> Result<RunningEntry, TimerStatusError> {
        let entry = with_deadline(SERVICE, self.timeout, async {
            Ok::<_, RemoteFetchError>(self.client.fetch_current_time_entry().await?)
        })
        .await?;

        running_entry(entry)
    }

    async fn start_time_entry(&self, request: &StartTimer) -> Result<(), RemoteFetchError> {
        let payload = StartTimeEntry::new(
            request.workspace_id,
            request.project_id,
            request.description.clone(),
            request.tags.clone(),
        );

        with_deadline(SERVICE, self.timeout, async {
            let entry = self.client.start_time_entry(&payload).await?;
            tracing::info!(
                entry_id = entry.id,
                project_id = ?entry.project_id,
                "started time entry"
            );
            Ok::<_, RemoteFetchError>(())
        })
        .await
    }
}

/// Archived projects are left out.
fn project_records(projects: Vec<Project>) -> Vec<ProjectRecord> {
    projects
        .into_iter()
        .filter(|p| p.active)
        .map(|p| ProjectRecord {
            id: p.id,
            workspace_id: p.workspace_id,
            name: p.name,
            color: p.color,
            hours: p.actual_hours,
        })
        .collect()
}

/// `null` from the current-entry endpoint and stopped entries both mean nothing is running.
fn running_entry(entry: Option<TimeEntry>) -> Result<RunningEntry, TimerStatusError> {
    match entry {
        Some(entry) if entry.is_running() => Ok(RunningEntry {
            project_id: entry.project_id,
            description: entry.description.filter(|d| !d.is_empty()),
            start: entry.start,
        }),
        _ => Err(TimerStatusError::NoActiveTimer),
    }
}
