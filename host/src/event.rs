//! The host's event surface, lifted into a closed enum.
//!
//! Positional callback arguments of the native API become named fields here.
//! Events whose default behavior a driver may suppress carry an
//! [`EventGate`]; prompt events additionally carry a [`Responder`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::prompt::Responder;
use crosswire_types::{AuthInfo, AuthRequest, Certificate, Credentials, WebContentsId, WindowId};

/// Shared prevent-default flag attached to cancellable host events.
///
/// Cloning shares the flag; the host checks it after dispatching the event
/// and skips its default behavior when any subscriber raised it.
#[derive(Clone, Default)]
pub struct EventGate {
    prevented: Arc<AtomicBool>,
}

impl EventGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&self) {
        self.prevented.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.prevented.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for EventGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventGate")
            .field("prevented", &self.is_default_prevented())
            .finish()
    }
}

/// Every event the host can emit, with payloads attached as named fields.
///
/// This is a closed enum: host implementations construct the variants, the
/// drivers pattern match on them. Variants are cloneable so the broadcast
/// hub can fan one emission out to every subscribed driver; prompt variants
/// stay cloneable because their [`Responder`] shares a single resolution
/// slot across copies.
#[derive(Debug, Clone)]
pub enum HostEvent {
    // Lifecycle
    WillFinishLaunching,
    Ready,
    WindowAllClosed,
    BeforeQuit {
        gate: EventGate,
    },
    WillQuit {
        gate: EventGate,
    },
    Quit {
        exit_code: i32,
    },

    // Application events
    OpenFile {
        path: PathBuf,
    },
    OpenUrl {
        url: String,
    },
    Activate {
        has_visible_windows: bool,
    },
    BrowserWindowBlur {
        window: WindowId,
    },
    BrowserWindowFocus {
        window: WindowId,
    },
    BrowserWindowCreated {
        window: WindowId,
    },
    GpuProcessCrashed,

    // Prompts: the responder must be resolved for the underlying native
    // operation to continue.
    Login {
        web_contents: WebContentsId,
        request: AuthRequest,
        auth_info: AuthInfo,
        responder: Responder<Credentials>,
        gate: EventGate,
    },
    SelectClientCertificate {
        web_contents: WebContentsId,
        url: String,
        certificates: Vec<Certificate>,
        responder: Responder<Certificate>,
        gate: EventGate,
    },
    CertificateError {
        web_contents: WebContentsId,
        url: String,
        error: String,
        certificate: Certificate,
        responder: Responder<bool>,
        gate: EventGate,
    },

    /// A second process instance launched while this one holds the
    /// single-instance lock.
    SecondInstance {
        argv: Vec<String>,
        cwd: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_lowered_and_latches() {
        let gate = EventGate::new();
        assert!(!gate.is_default_prevented());

        let copy = gate.clone();
        copy.prevent_default();
        assert!(gate.is_default_prevented());
    }
}
