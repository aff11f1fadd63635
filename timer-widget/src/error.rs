use std::fmt;

use thiserror::Error;
use todoist::TodoistFetchError;
use toggl::TogglFetchError;

use crate::controller::Screen;
use crate::types::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Toggl,
    Todoist,
    Dev,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Toggl => "Toggl",
            Service::Todoist => "Todoist",
            Service::Dev => "dev backend",
        };
        f.write_str(name)
    }
}

/// A remote call failed: unreachable, unauthorized, timed out or answered with garbage.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("{service}: unauthorized, check the API token")]
    Unauthorized { service: Service },
    #[error("{service}: request timed out")]
    Timeout { service: Service },
    #[error("{service}: {message}")]
    Response { service: Service, message: String },
    #[error("{service}: malformed response: {message}")]
    Malformed { service: Service, message: String },
    #[error("no time-tracking workspace available")]
    NoWorkspace,
}

impl From<TogglFetchError> for RemoteFetchError {
    fn from(err: TogglFetchError) -> Self {
        let service = Service::Toggl;
        match err {
            TogglFetchError::Unauthorized => Self::Unauthorized { service },
            TogglFetchError::Timeout => Self::Timeout { service },
            TogglFetchError::ResponseError(message) => Self::Response { service, message },
            TogglFetchError::ParsingError(message) => Self::Malformed { service, message },
        }
    }
}

impl From<TodoistFetchError> for RemoteFetchError {
    fn from(err: TodoistFetchError) -> Self {
        let service = Service::Todoist;
        match err {
            TodoistFetchError::Unauthorized => Self::Unauthorized { service },
            TodoistFetchError::Timeout => Self::Timeout { service },
            TodoistFetchError::ResponseError(message) => Self::Response { service, message },
            TodoistFetchError::ParsingError(message) => Self::Malformed { service, message },
        }
    }
}

#[derive(Debug, Error)]
pub enum TimerStatusError {
    #[error("no timer running")]
    NoActiveTimer,
    #[error(transparent)]
    Remote(#[from] RemoteFetchError),
}

/// A selection event was rejected or its side effect failed.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("not available on the {actual} screen (needs the {expected} screen)")]
    WrongScreen { expected: Screen, actual: Screen },
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),
    #[error("unknown task {0}")]
    UnknownTask(String),
    #[error(transparent)]
    Remote(#[from] RemoteFetchError),
}
