//! Crate error types
//!
//! Protocol transitions never fail: events that reference unknown rooms,
//! claim time authority they don't hold, or carry invalid numbers are
//! silently dropped (see `sync::coordinator`). The only fallible surface
//! is the transport: binding the listener and serving connections.

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for server operations
#[derive(Debug)]
pub enum Error {
    /// Failed to bind the listener address
    Bind(std::io::Error),
    /// I/O error while serving
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Bind(e) => write!(f, "Failed to bind listener: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Bind(e) | Error::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
