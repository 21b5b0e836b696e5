use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Named entries in the host's path registry.
///
/// The host resolves each name to a concrete directory; drivers read the
/// current value at subscription time and push replacements through the
/// path sink.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PathName {
    Home,
    AppData,
    UserData,
    Temp,
    Exe,
    Module,
    Desktop,
    Documents,
    Downloads,
    Music,
    Pictures,
    Videos,
}

impl PathName {
    /// All registry names, in a stable order. Drivers iterate this to build
    /// one watch source per name.
    pub const ALL: [PathName; 12] = [
        PathName::Home,
        PathName::AppData,
        PathName::UserData,
        PathName::Temp,
        PathName::Exe,
        PathName::Module,
        PathName::Desktop,
        PathName::Documents,
        PathName::Downloads,
        PathName::Music,
        PathName::Pictures,
        PathName::Videos,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PathName::Home => "home",
            PathName::AppData => "app-data",
            PathName::UserData => "user-data",
            PathName::Temp => "temp",
            PathName::Exe => "exe",
            PathName::Module => "module",
            PathName::Desktop => "desktop",
            PathName::Documents => "documents",
            PathName::Downloads => "downloads",
            PathName::Music => "music",
            PathName::Pictures => "pictures",
            PathName::Videos => "videos",
        }
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown path name: {0}")]
pub struct UnknownPathName(String);

impl FromStr for PathName {
    type Err = UnknownPathName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownPathName(s.to_string()))
    }
}
