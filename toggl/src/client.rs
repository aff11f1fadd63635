use std::future::Future;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    domain::{CreateTag, Project, StartTimeEntry, Tag, TimeEntry, Workspace},
    Credentials, TogglURL,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest page the projects endpoint hands out.
pub const PROJECTS_PER_PAGE: usize = 200;

#[derive(Debug, Clone)]
pub struct TogglClient {
    credentials: Credentials,
    base_url: TogglURL,
    timeout: Duration,
    http: reqwest::Client,
}

impl TogglClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: TogglURL::default(),
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: TogglURL::new(base_url),
            ..self
        }
    }

    /// Every request made by this client is aborted after `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TogglFetchError> {
        let (user, password) = self.credentials.basic_auth();
        let resp = request
            .basic_auth(user, password)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(TogglFetchError::from_transport)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TogglFetchError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TogglFetchError::ResponseError(format!(
                "{}: {}",
                status,
                body.trim()
            )));
        }

        Ok(resp)
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, TogglFetchError> {
        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                TogglFetchError::Timeout
            } else {
                TogglFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
            }
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: TogglURL) -> Result<T, TogglFetchError> {
        tracing::debug!(url = url.as_ref(), "GET");
        let resp = self.send(self.http.get(url.as_ref())).await?;
        Self::parse(resp).await
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: &TogglURL,
        page: usize,
        per_page: usize,
    ) -> Result<Option<Vec<T>>, TogglFetchError> {
        tracing::debug!(url = url.as_ref(), page, "GET");
        let request = self
            .http
            .get(url.as_ref())
            .query(&[("page", page), ("per_page", per_page)]);
        let resp = self.send(request).await?;
        Self::parse(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: TogglURL,
        body: &B,
    ) -> Result<T, TogglFetchError> {
        tracing::debug!(url = url.as_ref(), "POST");
        let resp = self.send(self.http.post(url.as_ref()).json(body)).await?;
        Self::parse(resp).await
    }

    pub async fn fetch_workspaces(&self) -> Result<Vec<Workspace>, TogglFetchError> {
        self.fetch(self.base_url.append_path("/workspaces")).await
    }

    pub async fn fetch_workspace_projects(
        &self,
        workspace_id: i64,
    ) -> Result<Vec<Project>, TogglFetchError> {
        let url = self.base_url.workspace(workspace_id).append_path("/projects");
        collect_pages(PROJECTS_PER_PAGE, |page| {
            self.fetch_page(&url, page, PROJECTS_PER_PAGE)
        })
        .await
    }

    pub async fn fetch_workspace_tags(
        &self,
        workspace_id: i64,
    ) -> Result<Vec<Tag>, TogglFetchError> {
        let url = self.base_url.workspace(workspace_id).append_path("/tags");
        let tags: Option<Vec<Tag>> = self.fetch(url).await?;
        Ok(tags.unwrap_or_default())
    }

    pub async fn create_tag(&self, workspace_id: i64, name: &str) -> Result<Tag, TogglFetchError> {
        let url = self.base_url.workspace(workspace_id).append_path("/tags");
        self.post(url, &CreateTag::new(name)).await
    }

    /// Returns `None` when no time entry is currently running.
    pub async fn fetch_current_time_entry(&self) -> Result<Option<TimeEntry>, TogglFetchError> {
        self.fetch(self.base_url.append_path("/me/time_entries/current"))
            .await
    }

    pub async fn start_time_entry(
        &self,
        entry: &StartTimeEntry,
    ) -> Result<TimeEntry, TogglFetchError> {
        let url = self
            .base_url
            .workspace(entry.workspace_id)
            .append_path("/time_entries");
        self.post(url, entry).await
    }
}

/// Request 1-based pages until one comes back short. An empty workspace answers with `null`
/// rather than `[]`.
async fn collect_pages<T, F, Fut>(
    per_page: usize,
    mut fetch_page: F,
) -> Result<Vec<T>, TogglFetchError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Option<Vec<T>>, TogglFetchError>>,
{
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let batch = fetch_page(page).await?.unwrap_or_default();
        let full = batch.len() >= per_page;
        items.extend(batch);
        if !full {
            return Ok(items);
        }
        page += 1;
    }
}

#[derive(Error, Debug)]
pub enum TogglFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Request timed out")]
    Timeout,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

impl TogglFetchError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::ResponseError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_client() -> TogglClient {
        dotenvy::from_filename(".env.local").ok();

        TogglClient::new(Credentials::from_env().unwrap())
    }

    #[tokio::test]
    #[ignore = "talks to the live Toggl API"]
    async fn test_fetch_workspaces() {
        let client = get_client().await;
        let workspaces = client.fetch_workspaces().await.unwrap();

        assert!(!workspaces.is_empty());
    }

    fn project_page(ids: &[i64]) -> Option<Vec<Project>> {
        let raw = ids
            .iter()
            .map(|id| format!(r#"{{"id": {}, "workspace_id": 4567, "name": "P{}"}}"#, id, id))
            .collect::<Vec<_>>()
            .join(",");
        serde_json::from_str(&format!("[{}]", raw)).unwrap()
    }

    #[tokio::test]
    async fn collects_every_project_page() {
        let pages = [project_page(&[1, 2]), project_page(&[3, 4]), project_page(&[5])];
        let mut requested = Vec::new();

        let projects = collect_pages(2, |page| {
            requested.push(page);
            std::future::ready(Ok(pages[page - 1].clone()))
        })
        .await
        .unwrap();

        let ids: Vec<_> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(requested, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn stops_on_empty_page_after_full_ones() {
        let pages = [project_page(&[1, 2]), project_page(&[]), project_page(&[9])];
        let mut requested = Vec::new();

        let projects = collect_pages(2, |page| {
            requested.push(page);
            std::future::ready(Ok(pages[page - 1].clone()))
        })
        .await
        .unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(requested, vec![1, 2]);
    }

    #[tokio::test]
    async fn null_page_is_an_empty_workspace() {
        let projects: Vec<Project> = collect_pages(PROJECTS_PER_PAGE, |_| {
            std::future::ready(Ok(serde_json::from_str::<Option<Vec<Project>>>("null").unwrap()))
        })
        .await
        .unwrap();

        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn page_errors_abort_the_fetch() {
        let result: Result<Vec<Project>, _> = collect_pages(2, |page| {
            std::future::ready(if page == 1 {
                Ok(project_page(&[1, 2]))
            } else {
                Err(TogglFetchError::Unauthorized)
            })
        })
        .await;

        assert!(matches!(result, Err(TogglFetchError::Unauthorized)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_response_error() {
        let client = TogglClient::new(Credentials::new("token").unwrap())
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));

        let err = client.fetch_workspaces().await.unwrap_err();
        assert!(matches!(
            err,
            TogglFetchError::ResponseError(_) | TogglFetchError::Timeout
        ));
    }
}
