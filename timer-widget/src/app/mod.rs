use crate::controller::{Screen, SelectionController};
use crate::types::{Project, Task};

mod navigation;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// UI-facing state: the selection controller plus cursors and the status line.
pub struct App {
    pub running: bool,
    pub controller: SelectionController,
    pub columns: usize,
    /// Cursor on the timer grid, an index into the catalog's projects.
    pub grid_index: usize,
    /// Cursor on the task list, an index into the visible page.
    pub task_index: usize,
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(controller: SelectionController, columns: usize) -> Self {
        Self {
            running: true,
            controller,
            columns: columns.max(1),
            grid_index: 0,
            task_index: 0,
            status_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn projects(&self) -> &[Project] {
        &self.controller.snapshot().projects
    }

    pub fn highlighted_project(&self) -> Option<&Project> {
        self.projects().get(self.grid_index)
    }

    pub fn highlighted_task(&self) -> Option<&Task> {
        self.controller.visible_tasks().get(self.task_index)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
