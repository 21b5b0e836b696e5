//! Certificate-error override driver.
//!
//! Source: certificate-error prompts with their default behavior (rejecting
//! the connection outright) already prevented. Sink: [`TrustDecision`]
//! items; `allow == true` lets the connection proceed despite the error.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::stream::forward_filtered;
use crosswire_host::{Host, HostEvent, Responder};
use crosswire_types::{Certificate, WebContentsId};

/// A pending certificate-error prompt.
#[derive(Debug, Clone)]
pub struct CertErrorPrompt {
    pub web_contents: WebContentsId,
    pub url: String,
    /// The host's error description, e.g. a verification failure name.
    pub error: String,
    pub certificate: Certificate,
    pub responder: Responder<bool>,
}

impl CertErrorPrompt {
    #[must_use]
    pub fn decide(&self, allow: bool) -> TrustDecision {
        TrustDecision {
            responder: self.responder.clone(),
            allow,
        }
    }
}

/// The trust decision for a pending certificate error.
#[derive(Debug, Clone)]
pub struct TrustDecision {
    pub responder: Responder<bool>,
    pub allow: bool,
}

pub struct CertErrorOverrideDriver {
    host: Arc<dyn Host>,
}

impl CertErrorOverrideDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn run(
        self,
        mut decisions: mpsc::Receiver<TrustDecision>,
    ) -> mpsc::Receiver<CertErrorPrompt> {
        tokio::spawn(async move {
            while let Some(decision) = decisions.recv().await {
                if let Err(err) = decision.responder.resolve(decision.allow) {
                    tracing::warn!(%err, "trust decision dropped");
                }
            }
        });

        forward_filtered(self.host.events(), |event| match event {
            HostEvent::CertificateError {
                web_contents,
                url,
                error,
                certificate,
                responder,
                gate,
            } => {
                gate.prevent_default();
                Some(CertErrorPrompt {
                    web_contents,
                    url,
                    error,
                    certificate,
                    responder,
                })
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub_host;
    use crosswire_host::EventGate;

    fn error_event(responder: Responder<bool>, gate: EventGate) -> HostEvent {
        HostEvent::CertificateError {
            web_contents: WebContentsId::new(9),
            url: "https://expired.example.org".to_string(),
            error: "net::ERR_CERT_DATE_INVALID".to_string(),
            certificate: Certificate {
                data: "-----BEGIN CERTIFICATE-----".to_string(),
                issuer_name: "Example CA".to_string(),
                subject_name: "expired.example.org".to_string(),
            },
            responder,
            gate,
        }
    }

    #[tokio::test]
    async fn prompt_carries_the_error_and_prevents_default() {
        let host = stub_host();
        let (_tx, rx) = mpsc::channel(1);
        let mut prompts = CertErrorOverrideDriver::new(host.clone()).run(rx);

        let (responder, _native_rx) = Responder::new();
        let gate = EventGate::new();
        host.emit(error_event(responder, gate.clone()));

        let prompt = prompts.recv().await.unwrap();
        assert!(gate.is_default_prevented());
        assert_eq!(prompt.error, "net::ERR_CERT_DATE_INVALID");
    }

    #[tokio::test]
    async fn allow_decision_reaches_the_native_callback() {
        let host = stub_host();
        let (tx, rx) = mpsc::channel(1);
        let mut prompts = CertErrorOverrideDriver::new(host.clone()).run(rx);

        let (responder, native_rx) = Responder::new();
        host.emit(error_event(responder, EventGate::new()));

        let prompt = prompts.recv().await.unwrap();
        tx.send(prompt.decide(true)).await.unwrap();

        assert!(native_rx.await.unwrap());
    }

    #[tokio::test]
    async fn deny_decision_reaches_the_native_callback() {
        let host = stub_host();
        let (tx, rx) = mpsc::channel(1);
        let mut prompts = CertErrorOverrideDriver::new(host.clone()).run(rx);

        let (responder, native_rx) = Responder::new();
        host.emit(error_event(responder, EventGate::new()));

        let prompt = prompts.recv().await.unwrap();
        tx.send(prompt.decide(false)).await.unwrap();

        assert!(!native_rx.await.unwrap());
    }
}
