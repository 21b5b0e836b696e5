use thiserror::Error;

/// Failures surfaced by the driver layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    /// A prompt responder was resolved a second time. The native callback
    /// behind it has already been invoked; the duplicate decision is dropped.
    #[error("prompt was already resolved")]
    PromptAlreadyResolved,

    /// The native side of a prompt went away before a decision arrived.
    #[error("prompt receiver dropped before resolution")]
    PromptDropped,
}

/// An application-level error pushed through the app driver's error sink.
///
/// The driver asks the host to exit with [`code`](Self::code), falling back
/// to exit code 1 when the error does not carry one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HostQuitError {
    pub message: String,
    pub code: Option<i32>,
}

impl HostQuitError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
        }
    }

    /// The exit code the host should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}
