//! Error types for ReaderKit

use thiserror::Error;

/// Errors that can occur while talking to the Reader engine
#[derive(Debug, Error)]
pub enum FetchError {
    /// Base URL of the Reader engine could not be parsed
    #[error("Invalid Reader base URL: {0}")]
    InvalidBaseUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Failed to connect to the Reader engine
    #[error("Failed to connect to Reader service: {0}")]
    ConnectError(reqwest::Error),

    /// Reader engine answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::InvalidBaseUrl("not a url".to_string()).to_string(),
            "Invalid Reader base URL: not a url"
        );
        assert_eq!(
            FetchError::Status {
                status: 502,
                body: "bad gateway".to_string()
            }
            .to_string(),
            "Request failed with status 502: bad gateway"
        );
        assert_eq!(
            FetchError::RequestError("boom".to_string()).to_string(),
            "Request failed: boom"
        );
    }
}
