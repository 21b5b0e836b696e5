use serde::{Deserialize, Serialize};

/// A single Chromium command-line switch, optionally carrying a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromiumSwitch {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ChromiumSwitch {
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A batch of Chromium command-line switches and positional arguments to
/// append to the host's embedded browser engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromiumParams {
    #[serde(default)]
    pub switches: Vec<ChromiumSwitch>,
    #[serde(default)]
    pub args: Vec<String>,
}
