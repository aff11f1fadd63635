pub const DEFAULT_TOGGL_URL: &str = "https://api.track.toggl.com/api/v9";

#[derive(Debug, Clone)]
pub struct TogglURL(String);

impl AsRef<str> for TogglURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for TogglURL {
    fn default() -> Self {
        Self(DEFAULT_TOGGL_URL.to_string())
    }
}

impl TogglURL {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    pub fn workspace(&self, workspace_id: i64) -> Self {
        self.append_path(&format!("/workspaces/{}", workspace_id))
    }
}
