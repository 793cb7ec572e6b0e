// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the overlap optimization toolkit.

use std::fmt;

/// Result type alias for overlap-toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Overlap-toolkit error types.
#[derive(Debug)]
pub enum Error {
    /// Malformed numerical input (empty eigenvalue sequence, level count
    /// exceeding available groups, wrong spin shape, ...)
    InvalidInput(String),
    /// Supplied vector length does not match the expected dimension
    DimensionMismatch { expected: usize, actual: usize },
    /// Invalid scalar parameter (non-finite or non-positive gamma/delta)
    InvalidArgument(String),
    /// Array-store error
    Store(StoreError),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Store(e) => write!(f, "Store error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Array-store errors.
#[derive(Debug)]
pub enum StoreError {
    /// Named dataset missing under the requested root prefix
    MissingDataset { root: String, name: String },
    /// Dataset present but not of the expected shape or type
    Malformed { name: String, message: String },
    /// Derived output file name collides with the input file
    OutputCollision(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingDataset { root, name } => {
                write!(f, "Dataset '{}{}' not found", root, name)
            }
            StoreError::Malformed { name, message } => {
                write!(f, "Dataset '{}': {}", name, message)
            }
            StoreError::OutputCollision(path) => {
                write!(
                    f,
                    "Output file name '{}' collides with the input file",
                    path
                )
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    // =========================================================================
    // Error Display tests
    // =========================================================================

    #[test]
    fn test_error_display_invalid_input() {
        let e = Error::InvalidInput("empty eigenvalue sequence".into());
        assert_eq!(e.to_string(), "Invalid input: empty eigenvalue sequence");
    }

    #[test]
    fn test_error_display_dimension_mismatch() {
        let e = Error::DimensionMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(e.to_string(), "Dimension mismatch: expected 4, got 3");
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let e = Error::InvalidArgument("gamma must be > 0".into());
        assert_eq!(e.to_string(), "Invalid argument: gamma must be > 0");
    }

    #[test]
    fn test_error_display_store() {
        let e = Error::Store(StoreError::MissingDataset {
            root: "solver/".into(),
            name: "eigenvalues".into(),
        });
        assert_eq!(
            e.to_string(),
            "Store error: Dataset 'solver/eigenvalues' not found"
        );
    }

    #[test]
    fn test_error_display_io() {
        let e = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "IO error: gone");
    }

    #[test]
    fn test_error_display_serialization() {
        let e = Error::Serialization("invalid json".into());
        assert_eq!(e.to_string(), "Serialization error: invalid json");
    }

    // =========================================================================
    // StoreError Display tests
    // =========================================================================

    #[test]
    fn test_store_error_display_malformed() {
        let e = StoreError::Malformed {
            name: "eigenvectors".into(),
            message: "ragged rows".into(),
        };
        assert_eq!(e.to_string(), "Dataset 'eigenvectors': ragged rows");
    }

    #[test]
    fn test_store_error_display_output_collision() {
        let e = StoreError::OutputCollision("state.json".into());
        assert_eq!(
            e.to_string(),
            "Output file name 'state.json' collides with the input file"
        );
    }

    // =========================================================================
    // Error::source() tests
    // =========================================================================

    #[test]
    fn test_error_source_io() {
        let e = Error::Io(std::io::Error::other("disk"));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_store() {
        let e = Error::Store(StoreError::OutputCollision("x".into()));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_invalid_input() {
        let e = Error::InvalidInput("x".into());
        assert!(e.source().is_none());
    }

    // =========================================================================
    // From impls
    // =========================================================================

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn test_from_store_error() {
        let se = StoreError::OutputCollision("x".into());
        let e: Error = se.into();
        assert!(matches!(e, Error::Store(StoreError::OutputCollision(_))));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }
}
