//! Configuration snapshots flowing through driver sinks.
//!
//! These are the "configuration objects" of the reactive model: each item a
//! driver receives on its sink channel is a complete snapshot, and the driver
//! replaces its active subscriptions wholesale when a new one arrives. Absent
//! (`None`/empty) fields leave the corresponding host state untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::path::PathName;
use crate::task::UserTask;

/// Desired lifecycle state of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    #[default]
    Started,
    /// Ask the host to begin an orderly quit.
    Quitting,
    /// Ask the host to exit immediately with [`LifecycleConfig::exit_code`]
    /// (0 when unset).
    Exiting,
}

/// One lifecycle configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default)]
    pub state: LifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// When false, the driver prevents the default of every before-quit
    /// event, so the application keeps running after all windows close.
    #[serde(default = "default_true")]
    pub quitting_enabled: bool,
    /// When false, the driver prevents the default of every will-quit event.
    #[serde(default = "default_true")]
    pub auto_exit_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            state: LifecycleState::Started,
            exit_code: None,
            quitting_enabled: true,
            auto_exit_enabled: true,
        }
    }
}

/// A replacement for one entry of the host's path registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathChange {
    pub name: PathName,
    pub path: PathBuf,
}

/// One application configuration snapshot: user tasks, the NTLM credential
/// policy, and path registry overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<UserTask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ntlm_for_non_intranet: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<PathName, PathBuf>,
}

/// One recent-documents operation. Clearing happens before adding, so a
/// single op can atomically reset the list to one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDocsOp {
    #[serde(default)]
    pub clear: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<PathBuf>,
}

impl RecentDocsOp {
    #[must_use]
    pub fn add(path: impl Into<PathBuf>) -> Self {
        Self {
            clear: false,
            add: Some(path.into()),
        }
    }

    #[must_use]
    pub fn clear() -> Self {
        Self {
            clear: true,
            add: None,
        }
    }
}

/// The host application's own metadata, published once by the metadata
/// driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub locale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_config_defaults_keep_quitting_enabled() {
        let config: LifecycleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.state, LifecycleState::Started);
        assert!(config.quitting_enabled);
        assert!(config.auto_exit_enabled);
        assert_eq!(config.exit_code, None);
    }

    #[test]
    fn app_config_paths_deserialize_by_name() {
        let config: AppConfig =
            serde_json::from_str(r#"{"paths":{"user-data":"/tmp/profile"}}"#).unwrap();
        assert_eq!(
            config.paths.get(&PathName::UserData),
            Some(&PathBuf::from("/tmp/profile"))
        );
        assert!(config.tasks.is_none());
    }

    #[test]
    fn recent_docs_op_constructors() {
        assert!(RecentDocsOp::clear().clear);
        assert_eq!(
            RecentDocsOp::add("/tmp/report.txt").add,
            Some(PathBuf::from("/tmp/report.txt"))
        );
    }
}
