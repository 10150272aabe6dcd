//! Error types for the batch runner
//!
//! Variants are grouped by the stage of the batch pipeline that raises them,
//! so callers can tell configuration problems from per-collection failures.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: String },

    #[error("Invalid command argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    // Discovery errors
    #[error("Error reading source directory: source path {path} is not a directory")]
    SourceNotDirectory { path: PathBuf },

    #[error("No JSON files found in the source directory {path}")]
    NoCollectionFiles { path: PathBuf },

    #[error("No valid Postman collections found in {path}")]
    NoValidCollections { path: PathBuf },

    // Per-collection errors
    #[error("Failed to inject scripts into collection: {message}")]
    CollectionLoad {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No requests matched the pattern \"{pattern}\"")]
    FilterExhausted { collection: String, pattern: String },

    #[error("{message}")]
    Runner {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Process execution failed: {command}")]
    ProcessExecution {
        command: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Batch control
    #[error("Execution stopped due to failure in {collection}: {reason}")]
    Bail { collection: String, reason: String },

    // Persistence errors
    #[error("Failed to write report to '{path}'")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Serialization errors
    #[error("JSON serialization error: {context}")]
    JsonSerialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("JSON deserialization error: {context}")]
    JsonDeserialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new Config error with context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new collection load error with source
    pub fn collection_load(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CollectionLoad {
            path: path.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Runner error
    pub fn runner(message: impl Into<String>) -> Self {
        Self::Runner {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Runner error with source
    pub fn runner_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Runner {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. }
            | Self::ConfigNotFound { .. }
            | Self::MissingArgument { .. }
            | Self::InvalidArgument { .. } => "config",
            Self::SourceNotDirectory { .. }
            | Self::NoCollectionFiles { .. }
            | Self::NoValidCollections { .. } => "discovery",
            Self::CollectionLoad { .. } | Self::FilterExhausted { .. } => "collection",
            Self::Runner { .. } | Self::ProcessExecution { .. } => "runner",
            Self::Bail { .. } => "bail",
            Self::ReportWrite { .. } | Self::Io { .. } => "io",
            Self::JsonSerialization { .. } | Self::JsonDeserialization { .. } => "serialization",
            Self::Other { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() {
            Self::JsonDeserialization {
                context: format!(
                    "JSON syntax error at line {} column {}",
                    err.line(),
                    err.column()
                ),
                source: Some(Box::new(err)),
            }
        } else if err.is_eof() {
            Self::JsonDeserialization {
                context: "Unexpected end of JSON input".to_string(),
                source: Some(Box::new(err)),
            }
        } else if err.is_data() {
            Self::JsonDeserialization {
                context: "JSON data error".to_string(),
                source: Some(Box::new(err)),
            }
        } else {
            Self::JsonSerialization {
                context: "JSON serialization error".to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AppError::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(AppError::config("x").category(), "config");
        assert_eq!(AppError::runner("x").category(), "runner");
        let bail = AppError::Bail {
            collection: "a.json".to_string(),
            reason: "boom".to_string(),
        };
        assert_eq!(bail.category(), "bail");
    }

    #[test]
    fn test_filter_exhausted_message() {
        let err = AppError::FilterExhausted {
            collection: "users.json".to_string(),
            pattern: "*/users/*".to_string(),
        };
        assert_eq!(err.to_string(), "No requests matched the pattern \"*/users/*\"");
        assert_eq!(err.category(), "collection");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();

        match app_err {
            AppError::Io { operation, .. } => assert_eq!(operation, "file not found"),
            other => panic!("Wrong error type: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.category(), "serialization");
    }
}
