//! Error types for the logging subsystem.

use std::io;

/// Result type for registry and dispatcher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dispatcher worker has exited and no longer accepts requests.
    #[error("dispatcher has stopped; request was not delivered")]
    DispatcherStopped,

    /// Shutdown was requested more than once.
    #[error("dispatcher was already shut down")]
    AlreadyStopped,

    /// The dispatcher thread panicked before it could be joined.
    #[error("dispatcher thread panicked")]
    WorkerPanicked,

    /// A bounded buffer must hold at least one entry.
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,

    /// The timestamp layout contains an unknown strftime specifier.
    #[error("invalid timestamp format: {0:?}")]
    InvalidTimestampFormat(String),

    /// I/O error (thread spawn, settings file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
}
