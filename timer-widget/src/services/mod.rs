//! Seams to the two remote services.
//!
//! The catalog and the selection controller only see these traits, so the real HTTP adapters can
//! be swapped for the in-memory [`DevBackend`] in dev mode and in tests.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{RemoteFetchError, Service, TimerStatusError};
use crate::types::{Label, ProjectRecord, RunningEntry, StartTimer, Task, Workspace, WorkspaceId};

mod dev_backend;
mod todoist_service;
mod toggl_service;

pub use dev_backend::DevBackend;
#[cfg(test)]
pub use dev_backend::DevCall;
pub use todoist_service::TodoistService;
pub use toggl_service::TogglService;

/// Outbound port for the time-tracking service.
#[async_trait]
pub trait TimeTrackingService: Send + Sync + 'static {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteFetchError>;

    async fn list_projects(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<ProjectRecord>, RemoteFetchError>;

    /// Tag names defined in the workspace.
    async fn list_tags(&self, workspace_id: WorkspaceId) -> Result<Vec<String>, RemoteFetchError>;

    async fn create_tag(&self, name: &str, workspace_id: WorkspaceId)
        -> Result<(), RemoteFetchError>;

    /// Fails with [`TimerStatusError::NoActiveTimer`] when nothing is running.
    async fn current_time_entry(&self) -> Result<RunningEntry, TimerStatusError>;

    async fn start_time_entry(&self, request: &StartTimer) -> Result<(), RemoteFetchError>;
}

/// Outbound port for the to-do list service.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list_labels(&self) -> Result<Vec<Label>, RemoteFetchError>;

    /// Tasks that are not completed, with project names and label ids resolved.
    async fn list_open_tasks(&self) -> Result<Vec<Task>, RemoteFetchError>;
}

/// Bound a whole remote operation, which may span several HTTP requests.
pub(crate) async fn with_deadline<T, F>(
    service: Service,
    timeout: Duration,
    fut: F,
) -> Result<T, RemoteFetchError>
where
    F: Future<Output = Result<T, RemoteFetchError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(%service, ?timeout, "remote call timed out");
            Err(RemoteFetchError::Timeout { service })
        }
    }
}
