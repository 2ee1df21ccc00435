use std::fmt;

/// Result type for traceplay-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the engine boundary
///
/// The engine itself is total over event data; errors only arise from
/// session metadata supplied by the caller.
#[derive(Debug)]
pub enum Error {
    /// Session creation timestamp could not be parsed as ISO-8601.
    ///
    /// This is a precondition failure for the whole engine: callers must
    /// detect it before normalizing or replaying and substitute empty
    /// results plus a user-visible error state.
    InvalidSessionStart(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSessionStart(raw) => {
                write!(f, "invalid session start timestamp: {}", raw)
            }
        }
    }
}

impl std::error::Error for Error {}
