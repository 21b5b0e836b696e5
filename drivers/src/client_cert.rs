//! Client-certificate selection driver.
//!
//! Source: selection prompts with their default behavior (picking the first
//! certificate) already prevented. Sink: [`CertificateSelection`] items
//! resolving each prompt with the chosen certificate.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::stream::forward_filtered;
use crosswire_host::{Host, HostEvent, Responder};
use crosswire_types::{Certificate, WebContentsId};

/// A pending client-certificate prompt.
#[derive(Debug, Clone)]
pub struct ClientCertPrompt {
    pub web_contents: WebContentsId,
    pub url: String,
    pub certificates: Vec<Certificate>,
    pub responder: Responder<Certificate>,
}

impl ClientCertPrompt {
    #[must_use]
    pub fn select(&self, certificate: Certificate) -> CertificateSelection {
        CertificateSelection {
            responder: self.responder.clone(),
            certificate,
        }
    }
}

/// The certificate chosen for a pending prompt.
#[derive(Debug, Clone)]
pub struct CertificateSelection {
    pub responder: Responder<Certificate>,
    pub certificate: Certificate,
}

pub struct ClientCertDriver {
    host: Arc<dyn Host>,
}

impl ClientCertDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn run(
        self,
        mut selections: mpsc::Receiver<CertificateSelection>,
    ) -> mpsc::Receiver<ClientCertPrompt> {
        tokio::spawn(async move {
            while let Some(selection) = selections.recv().await {
                if let Err(err) = selection.responder.resolve(selection.certificate) {
                    tracing::warn!(%err, "certificate selection dropped");
                }
            }
        });

        forward_filtered(self.host.events(), |event| match event {
            HostEvent::SelectClientCertificate {
                web_contents,
                url,
                certificates,
                responder,
                gate,
            } => {
                gate.prevent_default();
                Some(ClientCertPrompt {
                    web_contents,
                    url,
                    certificates,
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

    fn cert(subject: &str) -> Certificate {
        Certificate {
            data: format!("-----BEGIN CERTIFICATE-----\n{subject}"),
            issuer_name: "Example CA".to_string(),
            subject_name: subject.to_string(),
        }
    }

    #[tokio::test]
    async fn prompt_lists_candidates_and_prevents_default() {
        let host = stub_host();
        let (_tx, rx) = mpsc::channel(1);
        let mut prompts = ClientCertDriver::new(host.clone()).run(rx);

        let (responder, _native_rx) = Responder::new();
        let gate = EventGate::new();
        host.emit(HostEvent::SelectClientCertificate {
            web_contents: WebContentsId::new(3),
            url: "https://mtls.example.org".to_string(),
            certificates: vec![cert("client-a"), cert("client-b")],
            responder,
            gate: gate.clone(),
        });

        let prompt = prompts.recv().await.unwrap();
        assert!(gate.is_default_prevented());
        assert_eq!(prompt.certificates.len(), 2);
        assert_eq!(prompt.url, "https://mtls.example.org");
    }

    #[tokio::test]
    async fn selection_resolves_with_the_chosen_certificate() {
        let host = stub_host();
        let (tx, rx) = mpsc::channel(1);
        let mut prompts = ClientCertDriver::new(host.clone()).run(rx);

        let (responder, native_rx) = Responder::new();
        host.emit(HostEvent::SelectClientCertificate {
            web_contents: WebContentsId::new(3),
            url: "https://mtls.example.org".to_string(),
            certificates: vec![cert("client-a"), cert("client-b")],
            responder,
            gate: EventGate::new(),
        });

        let prompt = prompts.recv().await.unwrap();
        let chosen = prompt.certificates[1].clone();
        tx.send(prompt.select(chosen.clone())).await.unwrap();

        assert_eq!(native_rx.await.unwrap(), chosen);
    }
}
