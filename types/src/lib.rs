//! Core domain types for Crosswire.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer: the host
//! abstraction, the drivers, and embedding applications alike.

mod auth;
mod chromium;
mod config;
mod dock;
mod error;
mod ids;
mod path;
mod task;

pub use auth::{AuthInfo, AuthRequest, Certificate, Credentials};
pub use chromium::{ChromiumParams, ChromiumSwitch};
pub use config::{
    AppConfig, AppMetadata, LifecycleConfig, LifecycleState, PathChange, RecentDocsOp,
};
pub use dock::{BounceKind, DockMenu, DockMenuItem};
pub use error::{DriverError, HostQuitError};
pub use ids::{BounceId, NativeBounceId, WebContentsId, WindowId};
pub use path::{PathName, UnknownPathName};
pub use task::UserTask;
