//! Error context enhancement utilities
//!
//! Attaches operation and file information to errors coming from std and
//! third-party crates while converting them into [`AppError`].

use super::types::AppError;
use std::path::PathBuf;

/// Extension trait for adding context to error types
pub trait ErrorContextExt<T> {
    /// Add operation context to the error
    fn with_context(self, operation: impl Into<String>) -> Result<T, AppError>;

    /// Add operation and file context
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError>;
}

impl<T, E> ErrorContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context(self, operation: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| {
            let operation = operation.into();
            AppError::Other {
                message: format!("{}: {}", operation, e),
                source: Some(Box::new(e)),
            }
        })
    }

    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError> {
        self.map_err(|e| AppError::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = result.with_context("writing report").unwrap_err();
        assert_eq!(err.to_string(), "writing report: disk full");
    }

    #[test]
    fn test_in_file_operation_keeps_path() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"));
        match result.in_file_operation("/tmp/x.json", "read collection") {
            Err(AppError::Io { path, operation, .. }) => {
                assert_eq!(path, PathBuf::from("/tmp/x.json"));
                assert_eq!(operation, "read collection");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
