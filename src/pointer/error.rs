//! Pointer Backend Error Types

use thiserror::Error;

/// Result type for pointer backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// A pointer effect could not be executed
///
/// Always recoverable: the frame controller logs it and carries on.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is not connected to a pointing device
    #[error("Pointer backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused a specific effect
    #[error("Pointer backend rejected {effect}: {reason}")]
    Rejected {
        /// Effect that was refused
        effect: String,
        /// Backend-provided reason
        reason: String,
    },

    /// IO error talking to the device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BackendError::Rejected {
            effect: "click(left)".to_string(),
            reason: "device busy".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Pointer backend rejected click(left): device busy"
        );

        let io: BackendError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(io, BackendError::Io(_)));
    }
}
