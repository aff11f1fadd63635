use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    domain::{Label, Project, Task},
    Credentials, TodoistURL,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TodoistClient {
    credentials: Credentials,
    base_url: TodoistURL,
    timeout: Duration,
    http: reqwest::Client,
}

impl TodoistClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: TodoistURL::default(),
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: TodoistURL::new(base_url),
            ..self
        }
    }

    /// Every request made by this client is aborted after `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: TodoistURL) -> Result<T, TodoistFetchError> {
        tracing::debug!(url = url.as_ref(), "GET");

        let resp = self
            .http
            .get(url.as_ref())
            .bearer_auth(&self.credentials.api_token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(TodoistFetchError::from_transport)?;

        let resp = check_status(resp).await?;

        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                TodoistFetchError::Timeout
            } else {
                TodoistFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
            }
        })
    }

    pub async fn fetch_labels(&self) -> Result<Vec<Label>, TodoistFetchError> {
        self.fetch(self.base_url.append_path("/labels")).await
    }

    /// Names of shared labels. Tasks can carry these even though `/labels` never lists them.
    pub async fn fetch_shared_labels(&self) -> Result<Vec<String>, TodoistFetchError> {
        self.fetch(self.base_url.append_path("/labels/shared")).await
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>, TodoistFetchError> {
        self.fetch(self.base_url.append_path("/projects")).await
    }

    /// The tasks endpoint only lists tasks that are not completed.
    pub async fn fetch_active_tasks(&self) -> Result<Vec<Task>, TodoistFetchError> {
        let tasks: Vec<Task> = self.fetch(self.base_url.append_path("/tasks")).await?;
        Ok(tasks.into_iter().filter(|t| !t.is_completed).collect())
    }
}

async fn check_status(resp: Response) -> Result<Response, TodoistFetchError> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TodoistFetchError::Unauthorized);
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TodoistFetchError::ResponseError(format!(
            "{}: {}",
            status,
            body.trim()
        )));
    }

    Ok(resp)
}

#[derive(Error, Debug)]
pub enum TodoistFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Request timed out")]
    Timeout,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

impl TodoistFetchError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::ResponseError(err.to_string())
        }
    }
}
