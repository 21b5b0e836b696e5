//! Reactive-stream drivers for a desktop application host.
//!
//! Each driver wraps one slice of the host's callback-based API and follows
//! the same unidirectional convention: sink channels flow in (the driver
//! applies each item to the host), source streams flow out (the driver
//! republishes host events as typed items). A driver owns an
//! `Arc<dyn Host>` and nothing else; drivers are independent of each other.
//!
//! Sink subscriptions tied to a configuration snapshot are replaced
//! wholesale when the next snapshot arrives; see [`subscription::SinkSet`].

pub mod app;
pub mod app_config;
pub mod auth;
pub mod cert_override;
pub mod client_cert;
pub mod events;
pub mod lifecycle;
pub mod metadata;
pub mod paths;
pub mod recent_docs;
pub mod subscription;
pub mod tasks;
pub mod visibility;

mod stream;

pub use app::{
    AppDriver, AppDriverOptions, AppSinks, AppSource, BounceRequest, DockSinks, SecondInstance,
};
pub use app_config::{AppConfigDriver, AppConfigSource};
pub use auth::{BasicAuthDriver, LoginPrompt, LoginReply};
pub use cert_override::{CertErrorOverrideDriver, CertErrorPrompt, TrustDecision};
pub use client_cert::{CertificateSelection, ClientCertDriver, ClientCertPrompt};
pub use events::{AppEvent, AppEventsDriver};
pub use lifecycle::{LifecycleDriver, LifecycleSource};
pub use metadata::MetadataDriver;
pub use paths::{PathsDriver, PathsSource};
pub use recent_docs::RecentDocsDriver;
pub use subscription::SinkSet;
pub use tasks::TasksDriver;
pub use visibility::VisibilityDriver;

#[cfg(test)]
pub(crate) mod testing;
