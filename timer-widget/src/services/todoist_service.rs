use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use todoist::{Credentials, TodoistClient};

use super::{with_deadline, TodoService};
use crate::error::{RemoteFetchError, Service};
use crate::types::{Label, Task};

const SERVICE: Service = Service::Todoist;

pub struct TodoistService {
    client: TodoistClient,
    timeout: Duration,
}

impl TodoistService {
    pub fn new(credentials: Credentials, base_url: &str, timeout: Duration) -> Self {
        let client = TodoistClient::new(credentials)
            .with_base_url(base_url)
            .with_timeout(timeout);

        Self { client, timeout }
    }

    async fn fetch_all_labels(&self) -> Result<Vec<Label>, RemoteFetchError> {
        let personal = self.client.fetch_labels().await?;
        let shared = self.client.fetch_shared_labels().await?;
        Ok(merge_labels(personal, shared))
    }
}

#[async_trait]
impl TodoService for TodoistService {
    async fn list_labels(&self) -> Result<Vec<Label>, RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, self.fetch_all_labels()).await
    }

    async fn list_open_tasks(&self) -> Result<Vec<Task>, RemoteFetchError> {
        with_deadline(SERVICE, self.timeout, async {
            let labels = self.fetch_all_labels().await?;
            let projects = self.client.fetch_projects().await?;
            let tasks = self.client.fetch_active_tasks().await?;

            let label_ids: HashMap<String, String> =
                labels.into_iter().map(|l| (l.name, l.id)).collect();
            let project_names: HashMap<String, String> =
                projects.into_iter().map(|p| (p.id, p.name)).collect();

            Ok::<_, RemoteFetchError>(tasks
                .into_iter()
                .map(|task| resolve_task(task, &label_ids, &project_names))
                .collect())
        })
        .await
    }
}

/// Personal labels keep their ids. Shared labels have no label object, so their name doubles as
/// the id.
fn merge_labels(personal: Vec<todoist::domain::Label>, shared: Vec<String>) -> Vec<Label> {
    let mut labels: Vec<Label> = personal
        .into_iter()
        .map(|l| Label {
            id: l.id,
            name: l.name,
        })
        .collect();

    for name in shared {
        if labels.iter().any(|l| l.name == name) {
            continue;
        }
        labels.push(Label {
            id: name.clone(),
            name,
        });
    }
    labels
}

/// Todoist reports labels by name; tasks carry label ids so they line up with the label list.
fn resolve_task(
    task: todoist::domain::Task,
    label_ids: &HashMap<String, String>,
    project_names: &HashMap<String, String>,
) -> Task {
    let ids = task
        .labels
        .iter()
        .filter_map(|name| {
            let id = label_ids.get(name);
            if id.is_none() {
                tracing::debug!(
                    task_id = %task.id,
                    label = %name,
                    "dropping label without a label object"
                );
            }
            id.cloned()
        })
        .collect();

    let project_name = project_names
        .get(&task.project_id)
        .cloned()
        .unwrap_or_default();

    Task {
        id: task.id,
        content: task.content,
        project_name,
        label_ids: ids,
    }
}
