use serde::{Deserialize, Serialize};

/// How the dock icon should bounce to attract attention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BounceKind {
    /// Bounces until the bounce is cancelled or the app becomes active.
    Critical,
    /// Bounces once. This is what the host assumes when no kind is given.
    #[default]
    Informational,
}

/// A single entry of the dock context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockMenuItem {
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl DockMenuItem {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }
}

/// The dock context menu as a flat list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockMenu {
    #[serde(default)]
    pub items: Vec<DockMenuItem>,
}
