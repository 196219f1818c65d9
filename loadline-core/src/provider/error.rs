use thiserror::Error;

use crate::MatrixError;

/// Errors from [`crate::DistanceProvider::distance_matrix`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// No coordinates were provided.
    #[error("at least one coordinate is required")]
    EmptyInput,
    /// The distance service did not answer within the configured timeout.
    #[error("distance service timed out: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },
    /// The distance service could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Underlying transport error message.
        message: String,
    },
    /// The distance service answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Status text or response excerpt.
        message: String,
    },
    /// The distance service reported a failure in its response body.
    #[error("service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: String,
        /// Human-readable message from the service.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error message.
        message: String,
    },
    /// The decoded matrix was malformed.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(#[from] MatrixError),
}
