use std::env;
use std::fmt;

use thiserror::Error;

#[derive(Clone)]
pub struct Credentials {
    pub api_token: String,
}

#[derive(Error, Debug)]
pub enum IntoCredentialsError {
    #[error("Missing API token")]
    MissingApiToken,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>) -> Result<Self, IntoCredentialsError> {
        let api_token = api_token.into().trim().to_string();
        if api_token.is_empty() {
            return Err(IntoCredentialsError::MissingApiToken);
        }

        Ok(Self { api_token })
    }

    /// Reads the token from `TODOIST_API_TOKEN`.
    pub fn from_env() -> Result<Self, IntoCredentialsError> {
        let token =
            env::var("TODOIST_API_TOKEN").map_err(|_| IntoCredentialsError::MissingApiToken)?;
        Self::new(token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .finish()
    }
}
