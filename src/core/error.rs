//! Error types for filesum.
//!
//! [EnumerationError] is fatal: without a file list there is nothing to browse.
//! [FetchError] is per entry and never leaves the owning thread as a panic. It travels back
//! inside a [Notification](crate::core::worker::Notification) and ends up as the entry's
//! terminal `Failed` state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while enumerating the project or loading its ignore patterns.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("'{}' is not a git project (no .git found)", .0.display())]
    NotARepository(PathBuf),

    #[error("failed to read ignore patterns from '{}': {source}", path.display())]
    Patterns {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure of a single background size computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct FetchError {
    kind: io::ErrorKind,
    message: String,
}

impl FetchError {
    #[inline]
    pub fn kind(&self) -> io::ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// io::Error is neither Clone nor Eq, so only its kind and rendered text cross the channel.
impl From<io::Error> for FetchError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_keeps_kind_and_message() {
        let err = FetchError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.message(), "gone");
        assert_eq!(err.to_string(), "NotFound: gone");
    }

    #[test]
    fn not_a_repository_mentions_path() {
        let err = EnumerationError::NotARepository(PathBuf::from("/tmp/project"));
        assert!(err.to_string().contains("/tmp/project"));
    }
}
