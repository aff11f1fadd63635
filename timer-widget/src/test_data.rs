//! Demo workspace for `timer-widget dev`.
//! Project names follow the "-ing" convention so they line up with the to-do labels.

use crate::services::DevBackend;
use crate::types::{ProjectRecord, Task};

const WORKSPACE_ID: i64 = 1;

fn project(id: i64, name: &str, color: Option<&str>, hours: Option<i64>) -> ProjectRecord {
    ProjectRecord {
        id,
        workspace_id: WORKSPACE_ID,
        name: name.to_string(),
        color: color.map(str::to_string),
        hours,
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

pub fn seed(backend: DevBackend) -> DevBackend {
    let backend = backend
        .with_workspace(WORKSPACE_ID, "Personal")
        .with_project(project(1, "Writing", Some("#c9806b"), Some(42)))
        .with_project(project(2, "Coding", Some("#06aaf5"), Some(120)))
        .with_project(project(3, "Reading", Some("#9e5bd9"), Some(42)))
        .with_project(project(4, "Exercising", Some("#4dc3ff"), None))
        .with_project(project(5, "Planning", None, Some(3)))
        .with_tag(WORKSPACE_ID, "Thesis")
        .with_label("100", "Writing")
        .with_label("101", "Coding")
        .with_label("102", "Reading")
        .with_label("103", "Urgent");

    let tasks = [
        task("t1", "Outline methods section", "Thesis", &["100"]),
        task("t2", "Revise introduction", "Thesis", &["100", "103"]),
        task("t3", "Reply to reviewer comments", "Thesis", &["100"]),
        task("t4", "Blog post on widgets", "Blog", &["100"]),
        task("t5", "Fix flaky import test", "Side project", &["101", "103"]),
        task("t6", "Refactor config loading", "Side project", &["101"]),
        task("t7", "Read chapter 4", "Books", &["102"]),
        task("t8", "Water the plants", "Home", &[]),
    ];

    tasks
        .into_iter()
        .fold(backend, |backend, task| backend.with_task(task))
}
