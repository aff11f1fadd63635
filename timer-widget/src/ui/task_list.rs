use super::*;

pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let controller = &app.controller;
    let window = controller.window();
    let project_name = controller
        .selected_project()
        .map(|p| p.name.as_str())
        .unwrap_or_default();
    let page = format!(
        " page {}/{} ",
        window.page() + 1,
        window.page_count(controller.tasks().len()).max(1)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" {} ", project_name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(page).right_aligned());

    let visible = controller.visible_tasks();
    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No tasks on this page",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .block(block),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .map(|task| ListItem::new(task.list_label()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶");
        let mut state = ListState::default().with_selected(Some(app.task_index));
        frame.render_stateful_widget(list, chunks[0], &mut state);
    }

    let controls = controls_line(&[
        ("↑↓", "Move"),
        ("←→", "Page"),
        ("Enter", "Start"),
        ("Esc", "Back"),
        ("Q", "Quit"),
    ]);
    frame.render_widget(controls, chunks[1]);
}
