//! Error types for treelens operations

use std::path::PathBuf;
use thiserror::Error;

use crate::cst::ParseError;

/// Main error type for treelens operations
#[derive(Debug, Error)]
pub enum TreelensError {
    /// The parser rejected the source outright
    #[error("{message}")]
    ParseError { message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Config,
    Io,
}

impl TreelensError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreelensError::ParseError { .. } => ErrorKind::Parse,
            TreelensError::ConfigError { .. } => ErrorKind::Config,
            TreelensError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error is recoverable (other sources can still be rendered)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse)
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

impl From<ParseError> for TreelensError {
    fn from(err: ParseError) -> Self {
        Self::parse_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_parser_message() {
        let error = TreelensError::from(ParseError::NestingTooDeep {
            limit: 128,
            offset: 7,
        });
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert_eq!(
            error.to_string(),
            "nesting exceeds 128 levels at byte offset 7"
        );
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_config_and_io_kinds() {
        let config = TreelensError::config_error("bad tab width");
        assert_eq!(config.kind(), ErrorKind::Config);
        assert_eq!(config.to_string(), "Configuration error: bad tab width");

        let io = TreelensError::io_error(
            "missing.swift",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(!io.is_recoverable());
        assert!(io.to_string().starts_with("IO error for path 'missing.swift'"));
    }
}
