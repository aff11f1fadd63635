use std::env;
use std::fmt;

use thiserror::Error;

/// Toggl authenticates API tokens as the basic-auth username with the literal password
/// `api_token`.
const TOKEN_PASSWORD: &str = "api_token";

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

    /// Reads the token from `TOGGL_API_TOKEN`.
    pub fn from_env() -> Result<Self, IntoCredentialsError> {
        let token = env::var("TOGGL_API_TOKEN").map_err(|_| IntoCredentialsError::MissingApiToken)?;
        Self::new(token)
    }

    pub(crate) fn basic_auth(&self) -> (&str, Option<&str>) {
        (&self.api_token, Some(TOKEN_PASSWORD))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_rejected() {
        assert!(matches!(
            Credentials::new("   "),
            Err(IntoCredentialsError::MissingApiToken)
        ));
    }

    #[test]
    fn debug_output_hides_token() {
        let credentials = Credentials::new("secret-token").unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("secret-token"));
    }
}
