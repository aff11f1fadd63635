use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use time::OffsetDateTime;

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let _ = action_tx.send(Action::RefreshTimer);

    loop {
        app.controller.tick(OffsetDateTime::now_utc());
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            tracing::debug!(?action, "running action");
            run_action(action, app, &action_tx).await;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
