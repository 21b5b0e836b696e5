//! Host application abstraction for Crosswire.
//!
//! The drivers never talk to a concrete desktop runtime. They receive a
//! single injected [`Host`] handle: accessor/mutator methods for the native
//! surface (paths, metadata, tasks, dock, lifecycle) plus a broadcast
//! subscription for the events the host emits. Production code implements
//! [`Host`] over the real runtime; tests use the [`stub::StubHost`] recorder
//! (behind the `stub` feature).

mod event;
mod hub;
mod prompt;

#[cfg(feature = "stub")]
pub mod stub;

pub use event::{EventGate, HostEvent};
pub use hub::EventHub;
pub use prompt::Responder;

use std::path::PathBuf;

use tokio::sync::broadcast;

use crosswire_types::{
    BounceKind, Certificate, Credentials, DockMenu, NativeBounceId, PathName, UserTask,
};

/// The native desktop-application runtime the drivers wrap.
///
/// All methods take `&self`: the host is an external collaborator with its
/// own interior state, shared across every driver via `Arc<dyn Host>`. None
/// of the methods block; each forwards straight to the native surface.
pub trait Host: Send + Sync {
    // Metadata
    fn name(&self) -> String;
    fn version(&self) -> String;
    fn locale(&self) -> String;

    // Path registry
    fn app_path(&self) -> PathBuf;
    fn path(&self, name: PathName) -> PathBuf;
    fn set_path(&self, name: PathName, path: PathBuf);

    // Recent documents
    fn add_recent_document(&self, path: PathBuf);
    fn clear_recent_documents(&self);

    // User tasks and credential policy
    fn set_user_tasks(&self, tasks: Vec<UserTask>);
    fn allow_ntlm_for_non_intranet(&self, allow: bool);

    // Platform integration
    fn set_app_user_model_id(&self, id: &str);
    fn append_switch(&self, name: &str, value: Option<&str>);
    fn append_argument(&self, arg: &str);
    fn is_aero_glass_enabled(&self) -> bool;

    /// Claim the single-instance lock. Returns true when another instance
    /// already holds it, in which case the caller is expected to quit.
    fn make_single_instance(&self) -> bool;

    // Lifecycle and visibility
    fn quit(&self);
    fn exit(&self, code: i32);
    fn show(&self);
    fn hide(&self);

    fn dock(&self) -> &dyn Dock;

    /// Subscribe to the host's event stream. Every call returns a fresh
    /// receiver positioned at the next event to be emitted.
    fn events(&self) -> broadcast::Receiver<HostEvent>;
}

/// The host's dock (macOS) / taskbar facility.
pub trait Dock: Send + Sync {
    /// Start bouncing the dock icon. The returned id is only meaningful to
    /// [`cancel_bounce`](Self::cancel_bounce).
    fn bounce(&self, kind: BounceKind) -> NativeBounceId;
    fn cancel_bounce(&self, id: NativeBounceId);

    fn badge(&self) -> String;
    fn set_badge(&self, label: &str);

    fn show(&self);
    fn hide(&self);

    fn set_menu(&self, menu: DockMenu);
    fn set_icon(&self, icon: PathBuf);
}

/// Convenience responder aliases matching the three prompt shapes.
pub type CredentialsResponder = Responder<Credentials>;
pub type CertificateResponder = Responder<Certificate>;
pub type TrustResponder = Responder<bool>;
