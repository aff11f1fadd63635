use super::*;

impl App {
    pub fn grid_left(&mut self) {
        self.grid_index = self.grid_index.saturating_sub(1);
    }

    pub fn grid_right(&mut self) {
        if self.grid_index + 1 < self.projects().len() {
            self.grid_index += 1;
        }
    }

    pub fn grid_up(&mut self) {
        if self.grid_index >= self.columns {
            self.grid_index -= self.columns;
        }
    }

    pub fn grid_down(&mut self) {
        if self.grid_index + self.columns < self.projects().len() {
            self.grid_index += self.columns;
        }
    }

    pub fn task_up(&mut self) {
        self.task_index = self.task_index.saturating_sub(1);
    }

    pub fn task_down(&mut self) {
        if self.task_index + 1 < self.controller.visible_tasks().len() {
            self.task_index += 1;
        }
    }

    /// Turn the task list page and put the cursor on the first row.
    pub fn change_task_page(&mut self, delta: i64) {
        match self.controller.change_page(delta) {
            Ok(_) => self.task_index = 0,
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn leave_task_list(&mut self) {
        if let Err(e) = self.controller.exit_task_list() {
            self.set_error(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::services::DevBackend;
    use std::sync::Arc;

    fn app_with_projects(count: i64, columns: usize) -> App {
        let projects = (0..count)
            .map(|id| Project {
                id,
                workspace_id: 1,
                name: format!("p{}", id),
                color: "#000000".to_string(),
                hours: 0,
            })
            .collect();
        let snapshot = CatalogSnapshot {
            projects,
            ..CatalogSnapshot::default()
        };
        let controller =
            SelectionController::new(Arc::new(DevBackend::empty()), Arc::new(snapshot));
        App::new(controller, columns)
    }

    #[test]
    fn grid_cursor_moves_in_rows_and_columns() {
        let mut app = app_with_projects(7, 3);

        app.grid_down();
        assert_eq!(app.grid_index, 3);
        app.grid_down();
        assert_eq!(app.grid_index, 6);
        app.grid_down();
        assert_eq!(app.grid_index, 6);
        app.grid_right();
        assert_eq!(app.grid_index, 6);
        app.grid_up();
        app.grid_left();
        assert_eq!(app.grid_index, 2);
        app.grid_up();
        assert_eq!(app.grid_index, 2);
    }

    #[test]
    fn grid_cursor_stays_put_without_projects() {
        let mut app = app_with_projects(0, 3);
        app.grid_right();
        app.grid_down();
        assert_eq!(app.grid_index, 0);
        assert!(app.highlighted_project().is_none());
    }

    #[test]
    fn paging_on_the_grid_reports_an_error() {
        let mut app = app_with_projects(2, 3);
        app.change_task_page(1);
        assert!(app.status_message.as_ref().is_some_and(|s| s.is_error));
    }
}
