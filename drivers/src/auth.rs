//! Basic-auth prompt driver.
//!
//! Source: login prompts with their default behavior already prevented, so
//! the host waits for a streamed decision instead of failing the request.
//! Sink: [`LoginReply`] items; each resolves the original prompt with the
//! supplied credentials.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::stream::forward_filtered;
use crosswire_host::{Host, HostEvent, Responder};
use crosswire_types::{AuthInfo, AuthRequest, Credentials, WebContentsId};

/// A pending login prompt.
#[derive(Debug, Clone)]
pub struct LoginPrompt {
    pub web_contents: WebContentsId,
    pub request: AuthRequest,
    pub auth_info: AuthInfo,
    pub responder: Responder<Credentials>,
}

impl LoginPrompt {
    /// Pair this prompt with the credentials that answer it.
    #[must_use]
    pub fn reply(&self, credentials: Credentials) -> LoginReply {
        LoginReply {
            responder: self.responder.clone(),
            credentials,
        }
    }
}

/// A decision flowing back through the sink.
#[derive(Debug, Clone)]
pub struct LoginReply {
    pub responder: Responder<Credentials>,
    pub credentials: Credentials,
}

pub struct BasicAuthDriver {
    host: Arc<dyn Host>,
}

impl BasicAuthDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn run(self, mut replies: mpsc::Receiver<LoginReply>) -> mpsc::Receiver<LoginPrompt> {
        tokio::spawn(async move {
            while let Some(reply) = replies.recv().await {
                if let Err(err) = reply.responder.resolve(reply.credentials) {
                    tracing::warn!(%err, "login reply dropped");
                }
            }
        });

        forward_filtered(self.host.events(), |event| match event {
            HostEvent::Login {
                web_contents,
                request,
                auth_info,
                responder,
                gate,
            } => {
                gate.prevent_default();
                Some(LoginPrompt {
                    web_contents,
                    request,
                    auth_info,
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

    fn login_event(responder: Responder<Credentials>, gate: EventGate) -> HostEvent {
        HostEvent::Login {
            web_contents: WebContentsId::new(7),
            request: AuthRequest {
                url: "https://example.org/private".to_string(),
                method: "GET".to_string(),
            },
            auth_info: AuthInfo {
                is_proxy: false,
                scheme: "basic".to_string(),
                host: "example.org".to_string(),
                port: 443,
                realm: "private".to_string(),
            },
            responder,
            gate,
        }
    }

    #[tokio::test]
    async fn prompt_arrives_with_default_prevented() {
        let host = stub_host();
        let (_reply_tx, reply_rx) = mpsc::channel(1);
        let mut prompts = BasicAuthDriver::new(host.clone()).run(reply_rx);

        let (responder, _native_rx) = Responder::new();
        let gate = EventGate::new();
        host.emit(login_event(responder, gate.clone()));

        let prompt = prompts.recv().await.unwrap();
        assert!(gate.is_default_prevented());
        assert_eq!(prompt.web_contents, WebContentsId::new(7));
        assert_eq!(prompt.auth_info.realm, "private");
    }

    #[tokio::test]
    async fn reply_resolves_the_native_callback_with_the_credentials() {
        let host = stub_host();
        let (reply_tx, reply_rx) = mpsc::channel(1);
        let mut prompts = BasicAuthDriver::new(host.clone()).run(reply_rx);

        let (responder, native_rx) = Responder::new();
        host.emit(login_event(responder, EventGate::new()));

        let prompt = prompts.recv().await.unwrap();
        reply_tx
            .send(prompt.reply(Credentials::new("alice", "hunter2")))
            .await
            .unwrap();

        assert_eq!(
            native_rx.await.unwrap(),
            Credentials::new("alice", "hunter2")
        );
    }

    #[tokio::test]
    async fn second_reply_to_the_same_prompt_is_dropped() {
        let host = stub_host();
        let (reply_tx, reply_rx) = mpsc::channel(2);
        let mut prompts = BasicAuthDriver::new(host.clone()).run(reply_rx);

        let (responder, native_rx) = Responder::new();
        host.emit(login_event(responder, EventGate::new()));

        let prompt = prompts.recv().await.unwrap();
        reply_tx
            .send(prompt.reply(Credentials::new("alice", "first")))
            .await
            .unwrap();
        reply_tx
            .send(prompt.reply(Credentials::new("alice", "second")))
            .await
            .unwrap();

        assert_eq!(native_rx.await.unwrap(), Credentials::new("alice", "first"));
    }
}
