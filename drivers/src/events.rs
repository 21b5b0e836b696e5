//! Merged application-event driver.
//!
//! Source-only: republishes the host's application events (file/URL opens,
//! window focus changes, prompts, GPU crashes) as one stream of [`AppEvent`]
//! items. Prompt payloads pass through untouched; suppressing their default
//! behavior is the job of the dedicated prompt drivers.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::stream::forward_filtered;
use crosswire_host::{Host, HostEvent, Responder};
use crosswire_types::{AuthInfo, AuthRequest, Certificate, Credentials, WebContentsId, WindowId};

/// An application event with its payload fields named after the host's
/// positional callback arguments.
#[derive(Debug, Clone)]
pub enum AppEvent {
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
    CertificateError {
        web_contents: WebContentsId,
        url: String,
        error: String,
        certificate: Certificate,
        responder: Responder<bool>,
    },
    SelectClientCertificate {
        web_contents: WebContentsId,
        url: String,
        certificates: Vec<Certificate>,
        responder: Responder<Certificate>,
    },
    Login {
        web_contents: WebContentsId,
        request: AuthRequest,
        auth_info: AuthInfo,
        responder: Responder<Credentials>,
    },
    GpuProcessCrashed,
}

pub struct AppEventsDriver {
    host: Arc<dyn Host>,
}

impl AppEventsDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// Start forwarding. Lifecycle events are not part of this stream; the
    /// lifecycle driver owns those.
    #[must_use]
    pub fn run(self) -> mpsc::Receiver<AppEvent> {
        forward_filtered(self.host.events(), |event| match event {
            HostEvent::OpenFile { path } => Some(AppEvent::OpenFile { path }),
            HostEvent::OpenUrl { url } => Some(AppEvent::OpenUrl { url }),
            HostEvent::Activate {
                has_visible_windows,
            } => Some(AppEvent::Activate {
                has_visible_windows,
            }),
            HostEvent::BrowserWindowBlur { window } => {
                Some(AppEvent::BrowserWindowBlur { window })
            }
            HostEvent::BrowserWindowFocus { window } => {
                Some(AppEvent::BrowserWindowFocus { window })
            }
            HostEvent::BrowserWindowCreated { window } => {
                Some(AppEvent::BrowserWindowCreated { window })
            }
            HostEvent::CertificateError {
                web_contents,
                url,
                error,
                certificate,
                responder,
                gate: _,
            } => Some(AppEvent::CertificateError {
                web_contents,
                url,
                error,
                certificate,
                responder,
            }),
            HostEvent::SelectClientCertificate {
                web_contents,
                url,
                certificates,
                responder,
                gate: _,
            } => Some(AppEvent::SelectClientCertificate {
                web_contents,
                url,
                certificates,
                responder,
            }),
            HostEvent::Login {
                web_contents,
                request,
                auth_info,
                responder,
                gate: _,
            } => Some(AppEvent::Login {
                web_contents,
                request,
                auth_info,
                responder,
            }),
            HostEvent::GpuProcessCrashed => Some(AppEvent::GpuProcessCrashed),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub_host;
    use crosswire_host::EventGate;

    #[tokio::test]
    async fn open_file_carries_the_path() {
        let host = stub_host();
        let mut events = AppEventsDriver::new(host.clone()).run();

        host.emit(HostEvent::OpenFile {
            path: PathBuf::from("/tmp/drop.txt"),
        });

        match events.recv().await {
            Some(AppEvent::OpenFile { path }) => assert_eq!(path, PathBuf::from("/tmp/drop.txt")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn merges_events_in_emission_order() {
        let host = stub_host();
        let mut events = AppEventsDriver::new(host.clone()).run();

        host.emit(HostEvent::OpenUrl {
            url: "https://example.org".to_string(),
        });
        host.emit(HostEvent::Activate {
            has_visible_windows: true,
        });
        host.emit(HostEvent::GpuProcessCrashed);

        assert!(matches!(events.recv().await, Some(AppEvent::OpenUrl { .. })));
        assert!(matches!(
            events.recv().await,
            Some(AppEvent::Activate {
                has_visible_windows: true
            })
        ));
        assert!(matches!(
            events.recv().await,
            Some(AppEvent::GpuProcessCrashed)
        ));
    }

    #[tokio::test]
    async fn lifecycle_events_are_not_forwarded() {
        let host = stub_host();
        let mut events = AppEventsDriver::new(host.clone()).run();

        host.emit(HostEvent::Ready);
        host.emit(HostEvent::BeforeQuit {
            gate: EventGate::new(),
        });
        host.emit(HostEvent::GpuProcessCrashed);

        // The first thing to come through is the crash, not the lifecycle
        // events emitted before it.
        assert!(matches!(
            events.recv().await,
            Some(AppEvent::GpuProcessCrashed)
        ));
    }

    #[tokio::test]
    async fn login_prompt_passes_the_responder_through() {
        let host = stub_host();
        let mut events = AppEventsDriver::new(host.clone()).run();

        let (responder, rx) = Responder::new();
        host.emit(HostEvent::Login {
            web_contents: WebContentsId::new(1),
            request: AuthRequest {
                url: "https://example.org".to_string(),
                method: "GET".to_string(),
            },
            auth_info: AuthInfo {
                is_proxy: false,
                scheme: "basic".to_string(),
                host: "example.org".to_string(),
                port: 443,
                realm: "site".to_string(),
            },
            responder,
            gate: EventGate::new(),
        });

        match events.recv().await {
            Some(AppEvent::Login { responder, .. }) => {
                responder
                    .resolve(Credentials::new("user", "secret"))
                    .unwrap();
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(rx.await.unwrap(), Credentials::new("user", "secret"));
    }
}
