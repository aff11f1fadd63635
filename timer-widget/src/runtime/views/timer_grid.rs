use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_timer_grid_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Left | KeyCode::Char('h') => app.grid_left(),
        KeyCode::Right | KeyCode::Char('l') => app.grid_right(),
        KeyCode::Up | KeyCode::Char('k') => app.grid_up(),
        KeyCode::Down | KeyCode::Char('j') => app.grid_down(),
        KeyCode::Enter => {
            if let Some(project) = app.highlighted_project() {
                let project_id = project.id;
                app.clear_status();
                enqueue_action(action_tx, Action::SelectProject(project_id));
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.clear_status();
            enqueue_action(action_tx, Action::RefreshTimer);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}
