use thiserror::Error;

/// The scene JSON fails to parse, or references assets the worker
/// doesn't have. Surfaces as an `error` response; the worker
/// returns to listening (not a fatal exit).
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene parsing error: {0}")]
    Parse(String),

    #[error("missing asset: {0}")]
    MissingAsset(String),
}

/// The socket read/write failed mid-connection.
/// Logged at `warn!`; breaks the current connection loop without
/// terminating the process.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(#[from] pub std::io::Error);

/// Bind/listen failure at startup. Logged at `error!`; the
/// process exits non-zero.
#[derive(Debug, Error)]
pub enum Fatal {
    #[error("failed to bind to port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },

    #[error("failed to listen: {0}")]
    Listen(std::io::Error),
}

/// Aggregates every error kind a connection can produce, so the
/// connection-handling loop has one `Result` type to thread through.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<std::io::Error> for WorkerError {
    fn from(err: std::io::Error) -> Self {
        WorkerError::Transport(TransportError(err))
    }
}
