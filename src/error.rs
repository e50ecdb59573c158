//! Error types for stack construction, parsing and operations.
//!
//! Every failure is deterministic input trouble, so nothing here is retried.
//! Callers that only care about the broad category use [`StackError::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a [`StackError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed card, print or count input.
    Validation,
    /// Malformed or unsupported file content or extension.
    Format,
    /// Operation name not present in the registry.
    UnknownOperation,
    /// Underlying file system failure.
    Io,
}

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Unknown operation '{name}'. Available: {available}")]
    UnknownOperation { name: String, available: String },

    #[error("Invalid filter '{0}': expected property:operator:value")]
    InvalidFilter(String),

    #[error("Cannot read '{}': {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Cannot write '{}': {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StackError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        StackError::Validation(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        StackError::Format(msg.into())
    }

    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            StackError::Validation(_) | StackError::InvalidFilter(_) => ErrorKind::Validation,
            StackError::Format(_) => ErrorKind::Format,
            StackError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            StackError::Read(..) | StackError::Write(..) | StackError::Io(_) => ErrorKind::Io,
            StackError::Csv(e) if e.is_io_error() => ErrorKind::Io,
            StackError::Csv(_) => ErrorKind::Format,
        }
    }
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, StackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(StackError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(StackError::format("x").kind(), ErrorKind::Format);
        assert_eq!(
            StackError::InvalidFilter("name".into()).kind(),
            ErrorKind::Validation
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(StackError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_file_errors_name_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StackError::Read(PathBuf::from("decks/burn.arena"), io);

        assert_eq!(err.to_string(), "Cannot read 'decks/burn.arena': missing");
        assert_eq!(err.kind(), ErrorKind::Io);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StackError::Write(PathBuf::from("out.csv"), io);
        assert_eq!(err.to_string(), "Cannot write 'out.csv': denied");
    }

    #[test]
    fn test_unknown_operation_message() {
        let err = StackError::UnknownOperation {
            name: "xor".into(),
            available: "difference, intersection, union".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown operation 'xor'. Available: difference, intersection, union"
        );
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
    }
}
