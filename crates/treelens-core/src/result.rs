//! Result type alias for treelens operations

use crate::error::TreelensError;

/// Standard Result type for treelens operations
pub type Result<T> = std::result::Result<T, TreelensError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_continue() {
        let err: Result<u8> = Err(TreelensError::config_error("bad"));
        assert_eq!(err.log_and_continue(), None);
        assert_eq!(Ok::<u8, TreelensError>(1).log_and_continue(), Some(1));
    }
}
