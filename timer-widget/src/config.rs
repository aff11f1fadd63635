use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_PROJECT_COLOR;
use crate::controller::{DEFAULT_EXCLUDED_TAG_MARKER, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the Toggl Track API, e.g. "https://api.track.toggl.com/api/v9"
    #[serde(default = "default_toggl_api_url")]
    pub toggl_api_url: String,
    /// Base URL of the Todoist REST API, e.g. "https://api.todoist.com/rest/v2"
    #[serde(default = "default_todoist_api_url")]
    pub todoist_api_url: String,
    /// Project cells per row on the timer grid.
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Tasks per page on the task list.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tags containing this text are never attached to a timer.
    #[serde(default = "default_excluded_tag_marker")]
    pub excluded_tag_marker: String,
    #[serde(default = "default_project_color")]
    pub default_project_color: String,
}

fn default_toggl_api_url() -> String {
    "https://api.track.toggl.com/api/v9".to_string()
}

fn default_todoist_api_url() -> String {
    "https://api.todoist.com/rest/v2".to_string()
}

fn default_columns() -> usize {
    3
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_excluded_tag_marker() -> String {
    DEFAULT_EXCLUDED_TAG_MARKER.to_string()
}

fn default_project_color() -> String {
    DEFAULT_PROJECT_COLOR.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            toggl_api_url: default_toggl_api_url(),
            todoist_api_url: default_todoist_api_url(),
            columns: default_columns(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            excluded_tag_marker: default_excluded_tag_marker(),
            default_project_color: default_project_color(),
        }
    }
}

impl WidgetConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("timer-widget")
            .join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(dirs::cache_dir()
            .context("Cannot determine cache directory")?
            .join("timer-widget")
            .join("timer-widget.log"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            anyhow::bail!("columns must be at least 1");
        }
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
