use thiserror::Error;

use tabula_core::StoreError;

/// A network or server failure, carrying the underlying status/message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection, DNS, timeout, bad body).
    #[error("transport failure: {0}")]
    Io(String),
}

impl TransportError {
    /// Stable machine-readable code (`E####`) for each variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Status { .. } => "E4001",
            Self::Io(_) => "E4002",
        }
    }
}

/// Any failure a session operation can surface to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The operation requires a logged-in user.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl ClientError {
    /// Stable machine-readable code for each failure class.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Store(err) => err.code(),
            Self::Transport(err) => err.code(),
            Self::NotAuthenticated => "E4003",
        }
    }
}
