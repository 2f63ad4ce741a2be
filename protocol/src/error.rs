use thiserror::Error;

/// Malformed message, unknown action, version
/// mismatch, or a framing failure underneath. A `ProtocolError` always
/// surfaces to the peer as an `error` response, after which the
/// connection is closed.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("protocol version mismatch")]
    VersionMismatch,

    #[error("framing error: {0}")]
    Framing(#[from] std::io::Error),
}
