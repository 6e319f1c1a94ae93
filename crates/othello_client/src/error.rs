//! Failure taxonomy for match service calls.

use derive_more::{Display, Error};

/// A failed service call, carrying one human-readable message.
///
/// The three variants distinguish where the exchange broke down; callers
/// only need the message and, for fallback decisions, whether a prior
/// state exists to keep showing.
#[derive(Debug, Clone, Display, Error)]
pub enum ApiError {
    /// The service answered with a non-success status. The body text is
    /// surfaced verbatim.
    #[display("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied error body, unmodified.
        body: String,
    },
    /// No response was obtained (connection refused, DNS, timeout).
    #[display("request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// A response arrived but violated the expected shape.
    #[display("malformed response: {message}")]
    Decode {
        /// Description of the contract violation.
        message: String,
    },
}

impl ApiError {
    /// True for a 404 from the service, e.g. an unknown match id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_surface_status_and_body_verbatim() {
        let err = ApiError::Status {
            status: 400,
            body: "illegal move".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400: illegal move");
    }

    #[test]
    fn not_found_is_detected_by_status() {
        let missing = ApiError::Status {
            status: 404,
            body: "Match not found".to_string(),
        };
        assert!(missing.is_not_found());

        let transport = ApiError::Transport {
            message: "connection refused".to_string(),
        };
        assert!(!transport.is_not_found());
    }
}

