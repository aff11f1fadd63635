use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTag {
    pub name: String,
}

impl CreateTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
