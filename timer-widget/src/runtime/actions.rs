use crate::app::App;
use crate::controller::ProjectSelection;
use crate::types::ProjectId;

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(action: Action, app: &mut App, action_tx: &ActionTx) {
    match action {
        Action::SelectProject(project_id) => {
            handle_select_project(app, project_id, action_tx).await;
        }
        Action::SelectTask(task_id) => {
            handle_select_task(app, &task_id, action_tx).await;
        }
        Action::RefreshTimer => {
            refresh_timer(app).await;
        }
    }
}

async fn handle_select_project(app: &mut App, project_id: ProjectId, action_tx: &ActionTx) {
    match app.controller.select_project(project_id).await {
        Ok(ProjectSelection::TaskListOpened { tasks }) => {
            app.task_index = 0;
            app.set_status(format!("{} open tasks", tasks));
        }
        Ok(ProjectSelection::TimerStarted) => {
            let name = project_name(app, project_id);
            app.set_status(format!("Started timer for {}", name));
            let _ = action_tx.send(Action::RefreshTimer);
        }
        Err(e) => app.set_error(format!("Could not start timer: {}", e)),
    }
}

async fn handle_select_task(app: &mut App, task_id: &str, action_tx: &ActionTx) {
    match app.controller.select_task(task_id).await {
        Ok(()) => {
            app.set_status("Started timer");
            let _ = action_tx.send(Action::RefreshTimer);
        }
        Err(e) => app.set_error(format!("Could not start timer: {}", e)),
    }
}

pub(super) async fn refresh_timer(app: &mut App) {
    if let Err(e) = app.controller.refresh_current_timer().await {
        app.set_error(format!("Could not load running timer: {}", e));
    }
}

fn project_name(app: &App, project_id: ProjectId) -> String {
    app.controller
        .snapshot()
        .project(project_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| project_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RemoteCatalog;
    use crate::controller::{Screen, SelectionController, TimerDisplay};
    use crate::runtime::action_queue::channel;
    use crate::services::DevBackend;
    use std::sync::Arc;

    async fn dev_app() -> (App, DevBackend) {
        let backend = DevBackend::new();
        let shared = Arc::new(backend.clone());
        let snapshot = RemoteCatalog::new(shared.clone(), shared.clone())
            .refresh()
            .await
            .unwrap();
        let controller = SelectionController::new(shared, Arc::new(snapshot));
        (App::new(controller, 3), backend)
    }

    #[tokio::test]
    async fn project_without_tasks_queues_timer_refresh() {
        let (mut app, backend) = dev_app().await;
        let (tx, mut rx) = channel();

        // "Exercising" has no matching label in the demo data.
        run_action(Action::SelectProject(4), &mut app, &tx).await;

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(rx.try_recv().unwrap(), Action::RefreshTimer);
        run_action(Action::RefreshTimer, &mut app, &tx).await;
        assert!(matches!(
            app.controller.timer(),
            TimerDisplay::Running { project_name, .. } if project_name == "Exercising"
        ));
    }

    #[tokio::test]
    async fn task_selection_round_trip() {
        let (mut app, backend) = dev_app().await;
        let (tx, _rx) = channel();

        run_action(Action::SelectProject(1), &mut app, &tx).await;
        assert_eq!(app.screen(), Screen::TaskList);
        let task_id = app.highlighted_task().unwrap().id.clone();

        run_action(Action::SelectTask(task_id), &mut app, &tx).await;

        assert_eq!(app.screen(), Screen::TimerGrid);
        assert_eq!(backend.calls().len(), 2);
        assert_eq!(
            app.status_message.as_ref().map(|s| s.is_error),
            Some(false)
        );
    }
}
