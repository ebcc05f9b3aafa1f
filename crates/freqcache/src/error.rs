//! Error types for freqcache

use std::fmt;
use std::io;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug)]
pub enum Error {
    /// Key not present in the cache
    NotFound,

    /// Sweeper thread could not be spawned
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "Key not found"),
            Error::Io(e) => write!(f, "Failed to start sweeper: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        assert_eq!(Error::NotFound.to_string(), "Key not found");

        let err = Error::from(io::Error::new(io::ErrorKind::Other, "no threads"));
        assert_eq!(err.to_string(), "Failed to start sweeper: no threads");
        assert!(err.source().is_some());
        assert!(Error::NotFound.source().is_none());
    }
}
