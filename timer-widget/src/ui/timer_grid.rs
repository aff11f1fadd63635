use super::utils::{project_color, IDLE_COLOR};
use super::*;
use crate::controller::TimerDisplay;
use crate::time_utils::to_local_time;

const CELL_HEIGHT: u16 = 3;

pub fn render_timer_grid(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Running timer
            Constraint::Min(CELL_HEIGHT),
            Constraint::Length(3), // Controls
        ])
        .split(area);

    render_timer_header(frame, app, chunks[0]);
    render_project_grid(frame, app, chunks[1]);

    let controls = controls_line(&[
        ("←↑↓→", "Move"),
        ("Enter", "Select"),
        ("R", "Refresh"),
        ("Q", "Quit"),
    ]);
    frame.render_widget(controls, chunks[2]);
}

fn render_timer_header(frame: &mut Frame, app: &App, area: Rect) {
    let (text, bg) = match app.controller.timer() {
        TimerDisplay::Idle => ("No timer running".to_string(), IDLE_COLOR),
        TimerDisplay::Running {
            project_name,
            color,
            started,
            elapsed,
        } => {
            let local = to_local_time(*started);
            (
                format!(
                    "{}  {}  (since {:02}:{:02})",
                    project_name,
                    elapsed,
                    local.hour(),
                    local.minute()
                ),
                project_color(color),
            )
        }
    };

    let header = Paragraph::new(Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .style(Style::default().bg(bg));

    frame.render_widget(header, area);
}

fn render_project_grid(frame: &mut Frame, app: &App, area: Rect) {
    let projects = app.projects();
    if projects.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects").alignment(Alignment::Center),
            area,
        );
        return;
    }

    let columns = app.columns;
    let total_rows = projects.len().div_ceil(columns);
    let visible_rows = ((area.height / CELL_HEIGHT) as usize).max(1);
    let cursor_row = app.grid_index / columns;
    let first_row = (cursor_row + 1).saturating_sub(visible_rows);

    let row_constraints = vec![Constraint::Length(CELL_HEIGHT); visible_rows.min(total_rows)];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (offset, row_area) in rows.iter().enumerate() {
        let row = first_row + offset;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell_area) in cells.iter().enumerate() {
            let index = row * columns + col;
            let Some(project) = projects.get(index) else {
                break;
            };
            let highlighted = index == app.grid_index;
            render_project_cell(frame, &project.name, &project.color, highlighted, *cell_area);
        }
    }
}

fn render_project_cell(
    frame: &mut Frame,
    name: &str,
    color: &str,
    highlighted: bool,
    area: Rect,
) {
    let border_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black)
    };

    let cell = Paragraph::new(Span::styled(
        name.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(border_style))
    .style(Style::default().bg(project_color(color)));

    frame.render_widget(cell, area);
}
