//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Subject, project or salt rejected by the builder.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The POW is not valid base64 or does not decode to UTF-8.
    #[error("invalid POW encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded POW does not have the `subject/project#salt` shape.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// No OS username could be found to use as the machine salt.
    #[error("machine salt unavailable: none of {0} is set")]
    SaltUnavailable(String),

    /// Transport error while fetching the allow-list.
    #[error("network error: {0}")]
    Network(String),

    /// The allow-list server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
