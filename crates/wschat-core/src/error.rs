//! Shared error type across wschat crates.

use thiserror::Error;

use crate::protocol::notice::Severity;

/// Stable error codes (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// URL could not be turned into a transport request.
    TransportConstruction,
    /// Send attempted without an open channel.
    NotConnected,
    /// Inbound payload is not a usable envelope.
    MalformedFrame,
    /// Inbound discriminator outside the known set.
    UnknownEventType,
    /// I/O failure on an established channel.
    Transport,
    /// Invalid configuration.
    Config,
    /// Internal invariant broken.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TransportConstruction => "TRANSPORT_CONSTRUCTION",
            ErrorCode::NotConnected => "NOT_CONNECTED",
            ErrorCode::MalformedFrame => "MALFORMED_FRAME",
            ErrorCode::UnknownEventType => "UNKNOWN_EVENT_TYPE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("cannot construct transport: {0}")]
    TransportConstruction(String),
    #[error("websocket connection not established")]
    NotConnected,
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    /// Not a failure as such: the server speaks a newer protocol revision.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::TransportConstruction(_) => ErrorCode::TransportConstruction,
            ChatError::NotConnected => ErrorCode::NotConnected,
            ChatError::MalformedFrame(_) => ErrorCode::MalformedFrame,
            ChatError::UnknownEventType(_) => ErrorCode::UnknownEventType,
            ChatError::Transport(_) => ErrorCode::Transport,
            ChatError::Config(_) => ErrorCode::Config,
            ChatError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Notice severity used when this error is shown to the user.
    pub fn severity(&self) -> Severity {
        match self {
            ChatError::UnknownEventType(_) => Severity::Info,
            _ => Severity::Error,
        }
    }
}
