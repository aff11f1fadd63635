use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    /// Hex color such as `#06aaf5`.
    #[serde(default)]
    pub color: Option<String>,
    /// Hours tracked on the project. Absent or `null` for projects without entries.
    #[serde(default)]
    pub actual_hours: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
