use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

const TOGGL_KEY: &str = "toggl";
const TODOIST_KEY: &str = "todoist";

/// API tokens for both services. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredTokens {
    pub toggl: Option<String>,
    pub todoist: Option<String>,
}

impl StoredTokens {
    /// Environment variables win over the stored file.
    pub fn with_env_overrides(self) -> Self {
        let from_env = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            toggl: from_env("TOGGL_API_TOKEN").or(self.toggl),
            todoist: from_env("TODOIST_API_TOKEN").or(self.todoist),
        }
    }
}

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("timer-widget"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn credentials_path() -> Result<PathBuf> {
    Ok(root_path()?.join("credentials"))
}

fn parse_tokens(raw: &str) -> StoredTokens {
    let mut tokens = StoredTokens::default();
    for line in raw.lines() {
        let mut parts = line.splitn(2, '=');
        let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match name.trim() {
            TOGGL_KEY => tokens.toggl = Some(value.to_string()),
            TODOIST_KEY => tokens.todoist = Some(value.to_string()),
            _ => {}
        }
    }
    tokens
}

fn format_tokens(tokens: &StoredTokens) -> String {
    [(TOGGL_KEY, &tokens.toggl), (TODOIST_KEY, &tokens.todoist)]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn load_tokens() -> Result<StoredTokens> {
    let path = credentials_path()?;
    if !path.exists() {
        return Ok(StoredTokens::default());
    }

    let raw = std::fs::read_to_string(&path).context("Failed to read credentials file")?;
    Ok(parse_tokens(&raw))
}

pub fn save_tokens(tokens: &StoredTokens) -> Result<()> {
    let path = credentials_path()?;
    secure_write(path.as_path(), &format_tokens(tokens))
}

pub fn clear_tokens() -> Result<()> {
    let path = credentials_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
