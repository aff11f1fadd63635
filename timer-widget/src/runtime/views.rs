use crate::app::App;
use crate::controller::Screen;
use crossterm::event::KeyEvent;

use super::action_queue::{Action, ActionTx};

mod task_list;
mod timer_grid;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.screen() {
        Screen::TimerGrid => timer_grid::handle_timer_grid_key(key, app, action_tx),
        Screen::TaskList => task_list::handle_task_list_key(key, app, action_tx),
    }
}
