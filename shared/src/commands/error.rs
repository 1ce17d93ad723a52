use std::fmt;

use thiserror::Error;

/// Why a command failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// No response arrived before the command's deadline
    Timeout,
    /// The target entity does not exist in the deployment
    NotFound,
    /// No worker holds authority over the serving component, or it was lost
    /// while the request was in flight
    AuthorityLost,
    /// The caller is not allowed to issue this command
    PermissionDenied,
    /// The serving worker rejected the request
    ApplicationError,
    /// Something inside the runtime went wrong
    InternalError,
    /// The local worker disconnected before the command resolved
    Disconnected,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Failure detail handed to a command's failure continuation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct CommandError {
    pub code: StatusCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
