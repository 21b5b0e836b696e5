use serde::{Deserialize, Serialize};

/// A username/password pair answering a login prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Description of the authentication challenge attached to a login prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub is_proxy: bool,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub realm: String,
}

/// The network request that triggered an authentication or certificate
/// prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub url: String,
    pub method: String,
}

/// A certificate as surfaced by the host in certificate-error and
/// client-certificate prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// PEM-encoded certificate data.
    pub data: String,
    pub issuer_name: String,
    pub subject_name: String,
}
