use anyhow::{Context, Result};
use std::sync::Arc;

use crate::app::App;
use crate::catalog::RemoteCatalog;
use crate::config::WidgetConfig;
use crate::controller::SelectionController;
use crate::credential_store::StoredTokens;
use crate::services::{DevBackend, TimeTrackingService, TodoService, TodoistService, TogglService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Dev,
}

type Services = (Arc<dyn TimeTrackingService>, Arc<dyn TodoService>);

/// Build both service handles. Dev mode shares one in-memory backend between them.
pub fn build_services(mode: Mode, config: &WidgetConfig, tokens: StoredTokens) -> Result<Services> {
    if mode == Mode::Dev {
        let backend = Arc::new(DevBackend::new());
        return Ok((backend.clone(), backend));
    }

    let toggl_token = tokens
        .toggl
        .context("No Toggl API token. Run `timer-widget login` or set TOGGL_API_TOKEN")?;
    let todoist_token = tokens
        .todoist
        .context("No Todoist API token. Run `timer-widget login` or set TODOIST_API_TOKEN")?;

    let tracker = TogglService::new(
        toggl::Credentials::new(toggl_token)?,
        &config.toggl_api_url,
        config.request_timeout(),
    );
    let todo = TodoistService::new(
        todoist::Credentials::new(todoist_token)?,
        &config.todoist_api_url,
        config.request_timeout(),
    );

    Ok((Arc::new(tracker), Arc::new(todo)))
}

/// Fetch the catalog and assemble the app. A failed fetch is fatal: there is nothing to show.
pub async fn initialize_app(
    config: &WidgetConfig,
    tracker: Arc<dyn TimeTrackingService>,
    todo: Arc<dyn TodoService>,
) -> Result<App> {
    let snapshot = RemoteCatalog::new(tracker.clone(), todo)
        .with_default_color(config.default_project_color.clone())
        .refresh()
        .await
        .context("Failed to load projects and tasks")?;

    let controller = SelectionController::new(tracker, Arc::new(snapshot))
        .with_page_size(config.page_size)
        .with_excluded_tag_marker(config.excluded_tag_marker.clone())
        .with_default_color(config.default_project_color.clone());

    Ok(App::new(controller, config.columns))
}
