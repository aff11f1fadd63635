use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_task_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.task_up(),
        KeyCode::Down | KeyCode::Char('j') => app.task_down(),
        KeyCode::Left | KeyCode::Char('h') => app.change_task_page(-1),
        KeyCode::Right | KeyCode::Char('l') => app.change_task_page(1),
        KeyCode::Enter | KeyCode::Char('+') => {
            if let Some(task) = app.highlighted_task() {
                let task_id = task.id.clone();
                app.clear_status();
                enqueue_action(action_tx, Action::SelectTask(task_id));
            }
        }
        KeyCode::Esc => {
            app.leave_task_list();
            enqueue_action(action_tx, Action::RefreshTimer);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
