use crate::app::App;
use crate::controller::Screen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod task_list;
mod timer_grid;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    match app.screen() {
        Screen::TimerGrid => timer_grid::render_timer_grid(frame, app, root[0]),
        Screen::TaskList => task_list::render_task_list(frame, app, root[0]),
    }

    render_status_line(frame, app, root[1]);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = &app.status_message else {
        return;
    };

    let style = if status.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    frame.render_widget(
        Paragraph::new(Span::styled(status.text.as_str(), style)).alignment(Alignment::Left),
        area,
    );
}

fn controls_line(controls: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let spans: Vec<Span> = controls
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(format!(": {}  ", label)),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}
