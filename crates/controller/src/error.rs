//! Error types for controller access.

use thiserror::Error;

/// Failure to obtain an API key. No operational command may be issued without one.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Controller unreachable: {0}")]
    Transport(String),

    #[error("Key generation timed out after {0}ms")]
    Timeout(u64),

    #[error("Unparseable key generation response: {0}")]
    Malformed(String),

    #[error("Controller rejected credentials: {0}")]
    Rejected(String),

    #[error("Key generation response did not contain a key")]
    MissingKey,

    #[error("Invalid controller configuration: {0}")]
    InvalidConfig(String),
}

/// Category of a failed operational command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorCause {
    Network,
    Timeout,
    Malformed,
    ControllerRejected,
}

impl std::fmt::Display for CommandErrorCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandErrorCause::Network => write!(f, "network"),
            CommandErrorCause::Timeout => write!(f, "timeout"),
            CommandErrorCause::Malformed => write!(f, "malformed"),
            CommandErrorCause::ControllerRejected => write!(f, "controller_rejected"),
        }
    }
}

/// Failure of a single operational command.
///
/// Recoverable: callers degrade the affected fields and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Controller rejected command: {0}")]
    ControllerRejected(String),
}

impl CommandError {
    pub fn cause(&self) -> CommandErrorCause {
        match self {
            CommandError::Network(_) => CommandErrorCause::Network,
            CommandError::Timeout(_) => CommandErrorCause::Timeout,
            CommandError::Malformed(_) => CommandErrorCause::Malformed,
            CommandError::ControllerRejected(_) => CommandErrorCause::ControllerRejected,
        }
    }
}
