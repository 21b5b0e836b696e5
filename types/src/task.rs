use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A user task shown in the platform jump list / tasks category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTask {
    /// Path of the program to execute when the task is activated.
    pub program: PathBuf,
    #[serde(default)]
    pub arguments: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<PathBuf>,
    #[serde(default)]
    pub icon_index: u32,
}

impl UserTask {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: String::new(),
            title: title.into(),
            description: String::new(),
            icon_path: None,
            icon_index: 0,
        }
    }
}
