//! The two-screen selection state machine.
//!
//! `TimerGrid` shows every project; selecting one either starts a timer right away or, when the
//! project has associated tasks, opens `TaskList` where a task can be picked page by page.
//! Rendering reads this state and never changes it.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::catalog::{CatalogSnapshot, DEFAULT_PROJECT_COLOR};
use crate::error::{RemoteFetchError, SelectionError, TimerStatusError};
use crate::services::TimeTrackingService;
use crate::time_utils::format_elapsed;
use crate::types::{Project, ProjectId, StartTimer, Task};

mod paging;

pub use paging::{PageWindow, DEFAULT_PAGE_SIZE};

/// Tags containing this marker name time-tracking projects, not tasks.
pub const DEFAULT_EXCLUDED_TAG_MARKER: &str = "ing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TimerGrid,
    TaskList,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::TimerGrid => f.write_str("timer grid"),
            Screen::TaskList => f.write_str("task list"),
        }
    }
}

/// What the header shows about the running timer.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerDisplay {
    Idle,
    Running {
        project_name: String,
        color: String,
        started: OffsetDateTime,
        /// `H:MM`
        elapsed: String,
    },
}

/// Outcome of selecting a project on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSelection {
    /// The project has tasks; the task list is now showing.
    TaskListOpened { tasks: usize },
    /// No tasks; a timer without description was started.
    TimerStarted,
}

pub struct SelectionController {
    tracker: Arc<dyn TimeTrackingService>,
    snapshot: Arc<CatalogSnapshot>,
    excluded_tag_marker: String,
    /// Header color for a running entry whose project is not in the snapshot.
    default_color: String,
    screen: Screen,
    selected_project: Option<Project>,
    tasks: Vec<Task>,
    window: PageWindow,
    timer: TimerDisplay,
    /// Tags created during this session; the snapshot itself stays untouched.
    created_tags: HashSet<String>,
}

impl SelectionController {
    pub fn new(tracker: Arc<dyn TimeTrackingService>, snapshot: Arc<CatalogSnapshot>) -> Self {
        Self {
            tracker,
            snapshot,
            excluded_tag_marker: DEFAULT_EXCLUDED_TAG_MARKER.to_string(),
            default_color: DEFAULT_PROJECT_COLOR.to_string(),
            screen: Screen::TimerGrid,
            selected_project: None,
            tasks: Vec::new(),
            window: PageWindow::default(),
            timer: TimerDisplay::Idle,
            created_tags: HashSet::new(),
        }
    }

    pub fn with_page_size(self, size: usize) -> Self {
        Self {
            window: PageWindow::new(size),
            ..self
        }
    }

    pub fn with_excluded_tag_marker(self, marker: impl Into<String>) -> Self {
        Self {
            excluded_tag_marker: marker.into(),
            ..self
        }
    }

    pub fn with_default_color(self, color: impl Into<String>) -> Self {
        Self {
            default_color: color.into(),
            ..self
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project.as_ref()
    }

    /// All tasks of the selected project, in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// The tasks on the current page.
    pub fn visible_tasks(&self) -> &[Task] {
        self.window.slice(&self.tasks)
    }

    pub fn timer(&self) -> &TimerDisplay {
        &self.timer
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), SelectionError> {
        if self.screen != expected {
            return Err(SelectionError::WrongScreen {
                expected,
                actual: self.screen,
            });
        }
        Ok(())
    }

    pub async fn select_project(
        &mut self,
        project_id: ProjectId,
    ) -> Result<ProjectSelection, SelectionError> {
        self.expect_screen(Screen::TimerGrid)?;
        let project = self
            .snapshot
            .project(project_id)
            .cloned()
            .ok_or(SelectionError::UnknownProject(project_id))?;

        self.tasks = self.snapshot.tasks_for(&project);
        self.window.reset();
        self.selected_project = Some(project);

        if self.tasks.is_empty() {
            tracing::info!(project_id, "project has no tasks, starting timer");
            self.start_timer("", Vec::new(), project_id).await?;
            return Ok(ProjectSelection::TimerStarted);
        }

        tracing::info!(project_id, tasks = self.tasks.len(), "opening task list");
        self.screen = Screen::TaskList;
        Ok(ProjectSelection::TaskListOpened {
            tasks: self.tasks.len(),
        })
    }

    /// Start a timer for `task_id` on the selected project and return to the grid.
    /// The task list stays open when starting fails.
    pub async fn select_task(&mut self, task_id: &str) -> Result<(), SelectionError> {
        self.expect_screen(Screen::TaskList)?;
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownTask(task_id.to_string()))?;
        let project_id = self
            .selected_project
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| SelectionError::UnknownTask(task_id.to_string()))?;

        let tags = self.task_tags(&task);
        self.start_timer(&task.content, tags, project_id).await?;

        self.screen = Screen::TimerGrid;
        Ok(())
    }

    /// `[task project name] + [label names]`, skipping label ids the snapshot does not know.
    pub fn task_tags(&self, task: &Task) -> Vec<String> {
        std::iter::once(task.project_name.clone())
            .chain(
                task.label_ids
                    .iter()
                    .filter_map(|id| self.snapshot.label_name(id))
                    .map(str::to_string),
            )
            .collect()
    }

    pub fn change_page(&mut self, delta: i64) -> Result<&[Task], SelectionError> {
        self.expect_screen(Screen::TaskList)?;
        self.window.shift(delta);
        Ok(self.visible_tasks())
    }

    /// Back to the grid. The task list and page survive until the next project selection.
    pub fn exit_task_list(&mut self) -> Result<(), SelectionError> {
        self.expect_screen(Screen::TaskList)?;
        self.screen = Screen::TimerGrid;
        Ok(())
    }

    pub async fn refresh_current_timer(&mut self) -> Result<&TimerDisplay, RemoteFetchError> {
        self.refresh_current_timer_at(OffsetDateTime::now_utc())
            .await
    }

    /// Query the running entry and rebuild the header. No running timer shows as idle.
    pub async fn refresh_current_timer_at(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<&TimerDisplay, RemoteFetchError> {
        self.timer = match self.tracker.current_time_entry().await {
            Ok(entry) => {
                let project = entry.project_id.and_then(|id| self.snapshot.project(id));
                let (project_name, color) = match project {
                    Some(p) => (p.name.clone(), p.color.clone()),
                    None => (
                        entry
                            .description
                            .clone()
                            .unwrap_or_else(|| "(no project)".to_string()),
                        self.default_color.clone(),
                    ),
                };

                TimerDisplay::Running {
                    project_name,
                    color,
                    started: entry.start,
                    elapsed: format_elapsed(entry.start, now),
                }
            }
            Err(TimerStatusError::NoActiveTimer) => TimerDisplay::Idle,
            Err(TimerStatusError::Remote(err)) => {
                tracing::warn!(error = %err, "could not query running timer");
                self.timer = TimerDisplay::Idle;
                return Err(err);
            }
        };

        Ok(&self.timer)
    }

    /// Advance the elapsed time of a running timer without asking the service again.
    pub fn tick(&mut self, now: OffsetDateTime) {
        if let TimerDisplay::Running {
            started, elapsed, ..
        } = &mut self.timer
        {
            *elapsed = format_elapsed(*started, now);
        }
    }

    /// Tags that would be sent for `tags`: de-duplicated, without the excluded marker.
    pub fn filter_tags(&self, tags: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        tags.into_iter()
            .filter(|t| !t.is_empty())
            .filter(|t| !t.contains(self.excluded_tag_marker.as_str()))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    /// Create missing tags in the default workspace, then start the timer. Tags created before a
    /// failed start are kept.
    pub async fn start_timer(
        &mut self,
        description: &str,
        tags: Vec<String>,
        project_id: ProjectId,
    ) -> Result<(), SelectionError> {
        let project = self
            .snapshot
            .project(project_id)
            .ok_or(SelectionError::UnknownProject(project_id))?;
        let workspace_id = project.workspace_id;
        let tags = self.filter_tags(tags);

        let missing: Vec<String> = tags
            .iter()
            .filter(|t| !self.snapshot.has_tag(t) && !self.created_tags.contains(*t))
            .cloned()
            .collect();

        if !missing.is_empty() {
            let default_workspace = self
                .snapshot
                .default_workspace()
                .map(|w| w.id)
                .ok_or(RemoteFetchError::NoWorkspace)?;

            for tag in missing {
                self.tracker.create_tag(&tag, default_workspace).await?;
                self.created_tags.insert(tag);
            }
        }

        let request = StartTimer {
            workspace_id,
            project_id,
            description: description.to_string(),
            tags,
        };
        self.tracker.start_time_entry(&request).await.map_err(|err| {
            tracing::warn!(project_id, error = %err, "failed to start timer");
            err
        })?;

        tracing::info!(
            project_id,
            description = %request.description,
            tags = ?request.tags,
            "timer started"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RemoteCatalog;
    use crate::services::{DevBackend, DevCall};
    use crate::types::{ProjectRecord, RunningEntry};
    use time::macros::datetime;

    fn record(id: i64, name: &str, hours: i64) -> ProjectRecord {
        ProjectRecord {
            id,
            workspace_id: 1,
            name: name.to_string(),
            color: Some("#06aaf5".to_string()),
            hours: Some(hours),
        }
    }

    fn task(id: &str, content: &str, project_name: &str, label_ids: &[&str]) -> Task {
        Task {
            id: id.to_string(),
            content: content.to_string(),
            project_name: project_name.to_string(),
            label_ids: label_ids.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn base_backend() -> DevBackend {
        DevBackend::empty()
            .with_workspace(1, "Personal")
            .with_project(record(1, "Writing", 5))
            .with_project(record(2, "Coding", 10))
            .with_tag(1, "Thesis")
            .with_label("100", "Writing")
            .with_label("101", "Urgent")
    }

    async fn controller_for(backend: &DevBackend) -> SelectionController {
        let backend = Arc::new(backend.clone());
        let snapshot = RemoteCatalog::new(backend.clone(), backend.clone())
            .refresh()
            .await
            .unwrap();
        SelectionController::new(backend, Arc::new(snapshot))
    }

    fn started(backend: &DevBackend) -> Vec<StartTimer> {
        backend
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                DevCall::StartTimeEntry(request) => Some(request),
                DevCall::CreateTag { .. } => None,
            })
            .collect()
    }

    fn created_tags(backend: &DevBackend) -> Vec<String> {
        backend
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                DevCall::CreateTag { name, .. } => Some(name),
                DevCall::StartTimeEntry(_) => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn project_without_tasks_starts_timer_immediately() {
        let backend = base_backend();
        let mut controller = controller_for(&backend).await;

        let outcome = controller.select_project(2).await.unwrap();

        assert_eq!(outcome, ProjectSelection::TimerStarted);
        assert_eq!(controller.screen(), Screen::TimerGrid);
        assert_eq!(
            started(&backend),
            vec![StartTimer {
                workspace_id: 1,
                project_id: 2,
                description: String::new(),
                tags: vec![],
            }]
        );
    }

    #[tokio::test]
    async fn project_with_tasks_opens_sorted_task_list() {
        let backend = base_backend()
            .with_task(task("a", "Revise intro", "Thesis", &["100"]))
            .with_task(task("b", "Blog draft", "Blog", &["100"]))
            .with_task(task("c", "Outline", "Thesis", &["100"]))
            .with_task(task("d", "Unrelated", "Home", &["101"]));
        let mut controller = controller_for(&backend).await;

        let outcome = controller.select_project(1).await.unwrap();

        assert_eq!(outcome, ProjectSelection::TaskListOpened { tasks: 3 });
        assert_eq!(controller.screen(), Screen::TaskList);
        let ids: Vec<_> = controller.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(started(&backend).is_empty());
    }

    #[tokio::test]
    async fn paging_over_ten_research_tasks() {
        let mut backend = DevBackend::empty()
            .with_workspace(1, "Personal")
            .with_project(record(7, "Research", 1))
            .with_label("200", "Research");
        for i in 0..10 {
            let id = format!("r{}", i);
            let content = format!("Task {:02}", i);
            backend = backend.with_task(task(&id, &content, "Lab", &["200"]));
        }
        let mut controller = controller_for(&backend).await.with_page_size(8);

        controller.select_project(7).await.unwrap();
        assert_eq!(controller.visible_tasks().len(), 8);

        let page: Vec<_> = controller
            .change_page(1)
            .unwrap()
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(page, vec!["r8", "r9"]);

        assert!(controller.change_page(1).unwrap().is_empty());

        let page = controller.change_page(-5).unwrap();
        assert_eq!(page.len(), 8);
        assert_eq!(page[0].id, "r0");
        assert_eq!(controller.window().page(), 0);
    }

    #[tokio::test]
    async fn reselecting_after_exit_resets_page() {
        let mut backend = base_backend();
        for i in 0..12 {
            let id = format!("w{}", i);
            let content = format!("Item {:02}", i);
            backend = backend.with_task(task(&id, &content, "Thesis", &["100"]));
        }
        let mut controller = controller_for(&backend).await;

        controller.select_project(1).await.unwrap();
        let first: Vec<Task> = controller.tasks().to_vec();
        controller.change_page(1).unwrap();
        controller.exit_task_list().unwrap();

        assert_eq!(controller.screen(), Screen::TimerGrid);
        assert_eq!(controller.window().page(), 1);
        assert_eq!(controller.tasks(), first.as_slice());

        controller.select_project(1).await.unwrap();
        assert_eq!(controller.tasks(), first.as_slice());
        assert_eq!(controller.window().page(), 0);
    }

    #[tokio::test]
    async fn selecting_task_starts_timer_with_tags() {
        let backend = base_backend()
            .with_task(task("a", "Revise intro", "Thesis", &["100", "101", "999"]));
        let mut controller = controller_for(&backend).await;

        controller.select_project(1).await.unwrap();
        controller.select_task("a").await.unwrap();

        assert_eq!(controller.screen(), Screen::TimerGrid);
        // "Writing" is dropped by the marker, "999" is not a known label.
        assert_eq!(
            started(&backend),
            vec![StartTimer {
                workspace_id: 1,
                project_id: 1,
                description: "Revise intro".to_string(),
                tags: vec!["Thesis".to_string(), "Urgent".to_string()],
            }]
        );
        // "Thesis" already exists, "Urgent" had to be created.
        assert_eq!(created_tags(&backend), vec!["Urgent"]);
    }

    #[tokio::test]
    async fn tags_are_created_once_per_session() {
        let backend = base_backend()
            .with_task(task("a", "One", "Blog", &["100"]))
            .with_task(task("b", "Two", "Blog", &["100"]));
        let mut controller = controller_for(&backend).await;

        controller.select_project(1).await.unwrap();
        controller.select_task("a").await.unwrap();
        controller.select_project(1).await.unwrap();
        controller.select_task("b").await.unwrap();

        assert_eq!(created_tags(&backend), vec!["Blog"]);
        assert_eq!(started(&backend).len(), 2);
        assert!(!controller.snapshot().has_tag("Blog"));
    }

    #[tokio::test]
    async fn start_timer_never_sends_marker_tags() {
        let backend = base_backend();
        let mut controller = controller_for(&backend).await;

        controller
            .start_timer(
                "notes",
                vec![
                    "Meeting".to_string(),
                    "ing".to_string(),
                    "Thesis".to_string(),
                    "Kingdom".to_string(),
                    "Thesis".to_string(),
                    String::new(),
                ],
                1,
            )
            .await
            .unwrap();

        let requests = started(&backend);
        assert_eq!(requests[0].tags, vec!["Thesis"]);
        assert!(requests
            .iter()
            .flat_map(|r| r.tags.iter())
            .all(|t| !t.contains("ing")));
    }

    #[tokio::test]
    async fn custom_marker_is_respected() {
        let backend = base_backend();
        let mut controller = controller_for(&backend)
            .await
            .with_excluded_tag_marker("@");

        controller
            .start_timer("", vec!["Meeting".to_string(), "@proj".to_string()], 1)
            .await
            .unwrap();

        assert_eq!(started(&backend)[0].tags, vec!["Meeting"]);
    }

    #[tokio::test]
    async fn failed_start_keeps_task_list_and_created_tags() {
        let backend = base_backend()
            .with_task(task("a", "Revise intro", "Blog", &["100"]))
            .failing_start();
        let mut controller = controller_for(&backend).await;

        controller.select_project(1).await.unwrap();
        let err = controller.select_task("a").await.unwrap_err();

        assert!(matches!(err, SelectionError::Remote(_)));
        assert_eq!(controller.screen(), Screen::TaskList);
        assert_eq!(created_tags(&backend), vec!["Blog"]);
    }

    #[tokio::test]
    async fn events_on_the_wrong_screen_are_rejected() {
        let backend = base_backend().with_task(task("a", "Revise intro", "Thesis", &["100"]));
        let mut controller = controller_for(&backend).await;

        assert!(matches!(
            controller.change_page(1),
            Err(SelectionError::WrongScreen {
                expected: Screen::TaskList,
                actual: Screen::TimerGrid
            })
        ));
        assert!(controller.exit_task_list().is_err());
        assert!(controller.select_task("a").await.is_err());

        controller.select_project(1).await.unwrap();
        assert!(matches!(
            controller.select_project(1).await,
            Err(SelectionError::WrongScreen { .. })
        ));
        assert!(matches!(
            controller.select_task("nope").await,
            Err(SelectionError::UnknownTask(_))
        ));
        assert!(started(&backend).is_empty());
    }

    #[tokio::test]
    async fn unknown_project_is_rejected() {
        let backend = base_backend();
        let mut controller = controller_for(&backend).await;

        assert!(matches!(
            controller.select_project(404).await,
            Err(SelectionError::UnknownProject(404))
        ));
        assert_eq!(controller.screen(), Screen::TimerGrid);
    }

    #[tokio::test]
    async fn no_running_timer_shows_idle() {
        let backend = base_backend();
        let mut controller = controller_for(&backend).await;

        let display = controller.refresh_current_timer().await.unwrap();
        assert_eq!(display, &TimerDisplay::Idle);
    }

    #[tokio::test]
    async fn running_timer_uses_project_name_and_color() {
        let backend = base_backend().with_running_entry(RunningEntry {
            project_id: Some(2),
            description: Some("Fix import".to_string()),
            start: datetime!(2024-06-28 08:15:30 UTC),
        });
        let mut controller = controller_for(&backend).await;

        let display = controller
            .refresh_current_timer_at(datetime!(2024-06-28 09:20:10 UTC))
            .await
            .unwrap();

        assert_eq!(
            display,
            &TimerDisplay::Running {
                project_name: "Coding".to_string(),
                color: "#06aaf5".to_string(),
                started: datetime!(2024-06-28 08:15:30 UTC),
                elapsed: "1:04".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn running_timer_without_known_project_falls_back() {
        let backend = base_backend().with_running_entry(RunningEntry {
            project_id: None,
            description: None,
            start: datetime!(2024-06-28 08:00:00 UTC),
        });
        let mut controller = controller_for(&backend).await;

        let display = controller
            .refresh_current_timer_at(datetime!(2024-06-28 08:00:00 UTC))
            .await
            .unwrap()
            .clone();

        match display {
            TimerDisplay::Running {
                project_name,
                color,
                ..
            } => {
                assert_eq!(project_name, "(no project)");
                assert_eq!(color, DEFAULT_PROJECT_COLOR);
            }
            TimerDisplay::Idle => panic!("expected a running timer"),
        }
    }

    #[tokio::test]
    async fn unknown_project_uses_configured_default_color() {
        let backend = base_backend().with_running_entry(RunningEntry {
            project_id: Some(99),
            description: Some("Inbox zero".to_string()),
            start: datetime!(2024-06-28 08:00:00 UTC),
        });
        let mut controller = controller_for(&backend)
            .await
            .with_default_color("#ff8800");

        let display = controller
            .refresh_current_timer_at(datetime!(2024-06-28 08:30:00 UTC))
            .await
            .unwrap();

        assert!(matches!(
            display,
            TimerDisplay::Running { project_name, color, .. }
                if project_name == "Inbox zero" && color == "#ff8800"
        ));
    }

    #[tokio::test]
    async fn tick_advances_elapsed_time() {
        let backend = base_backend().with_running_entry(RunningEntry {
            project_id: Some(1),
            description: None,
            start: datetime!(2024-06-28 08:00:00 UTC),
        });
        let mut controller = controller_for(&backend).await;
        controller
            .refresh_current_timer_at(datetime!(2024-06-28 08:05:00 UTC))
            .await
            .unwrap();

        controller.tick(datetime!(2024-06-28 10:07:59 UTC));

        assert!(matches!(
            controller.timer(),
            TimerDisplay::Running { elapsed, .. } if elapsed == "2:07"
        ));
    }

    #[test]
    fn tick_leaves_idle_alone() {
        let mut controller = SelectionController::new(
            Arc::new(DevBackend::empty()),
            Arc::new(CatalogSnapshot::default()),
        );

        controller.tick(datetime!(2024-06-28 10:00:00 UTC));
        assert_eq!(controller.timer(), &TimerDisplay::Idle);
    }

    #[tokio::test]
    async fn timer_query_failure_is_reported_and_shows_idle() {
        let backend = base_backend();
        let mut controller = controller_for(&backend).await;
        let unreachable: Arc<dyn TimeTrackingService> = Arc::new(backend.clone().unreachable());
        controller.tracker = unreachable;

        assert!(controller.refresh_current_timer().await.is_err());
        assert_eq!(controller.timer(), &TimerDisplay::Idle);
    }
}
