use thiserror::Error;

/// Message fragments that mark a connection-level failure even when a status is present
const NETWORK_MARKERS: [&str; 2] = ["ERR_INSUFFICIENT_RESOURCES", "ERR_NETWORK"];

/// Failure of a single request attempt, as produced at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} failed with status {status}: {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {url} (status {status}): {message}")]
    Decode {
        url: String,
        status: u16,
        message: String,
    },

    #[error("invalid request for {url}: {message}")]
    InvalidRequest { url: String, message: String },

    #[error("unexpected error for {url}: {message}")]
    Unknown { url: String, message: String },
}

/// Retry-relevant classification of a [`RequestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientFailure {
    NetworkUnavailable,
    RateLimited,
    ServerError,
    NonTransient,
}

impl RequestError {
    pub fn url(&self) -> &str {
        match self {
            RequestError::Network { url, .. }
            | RequestError::HttpStatus { url, .. }
            | RequestError::Decode { url, .. }
            | RequestError::InvalidRequest { url, .. }
            | RequestError::Unknown { url, .. } => url,
        }
    }

    /// `None` when no response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status, .. } | RequestError::Decode { status, .. } => {
                Some(*status)
            }
            RequestError::Network { .. }
            | RequestError::InvalidRequest { .. }
            | RequestError::Unknown { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RequestError::Network { message, .. }
            | RequestError::HttpStatus { message, .. }
            | RequestError::Decode { message, .. }
            | RequestError::InvalidRequest { message, .. }
            | RequestError::Unknown { message, .. } => message,
        }
    }

    pub fn classify(&self) -> TransientFailure {
        if matches!(
            self,
            RequestError::Decode { .. } | RequestError::InvalidRequest { .. }
        ) {
            return TransientFailure::NonTransient;
        }

        match self.status() {
            None | Some(0) => TransientFailure::NetworkUnavailable,
            Some(429) => TransientFailure::RateLimited,
            Some(502..=504) => TransientFailure::ServerError,
            Some(_) if self.has_network_marker() => TransientFailure::NetworkUnavailable,
            // A bare 500 lands here
            Some(_) => TransientFailure::NonTransient,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.classify() != TransientFailure::NonTransient
    }

    /// Whether attempt number `attempt` (0-indexed) may be followed by another one.
    ///
    /// Narrower than [`is_transient`](Self::is_transient): the status must also be absent,
    /// 429, or a 5xx.
    pub fn should_retry(&self, attempt: u32, max_retries: u32) -> bool {
        let retryable_status = match self.status() {
            None | Some(0) | Some(429) => true,
            Some(status) => status >= 500,
        };
        attempt < max_retries && self.is_transient() && retryable_status
    }

    fn has_network_marker(&self) -> bool {
        let message = self.message();
        NETWORK_MARKERS.iter().any(|marker| message.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, message: &str) -> RequestError {
        RequestError::HttpStatus {
            url: "https://api.test/contracts".to_string(),
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_classify_statuses() {
        assert_eq!(status_error(429, "").classify(), TransientFailure::RateLimited);
        assert_eq!(status_error(502, "").classify(), TransientFailure::ServerError);
        assert_eq!(status_error(503, "").classify(), TransientFailure::ServerError);
        assert_eq!(status_error(504, "").classify(), TransientFailure::ServerError);
        assert_eq!(status_error(500, "").classify(), TransientFailure::NonTransient);
        assert_eq!(status_error(400, "").classify(), TransientFailure::NonTransient);
        assert_eq!(status_error(404, "").classify(), TransientFailure::NonTransient);
    }

    #[test]
    fn test_classify_without_status() {
        let network = RequestError::Network {
            url: "u".to_string(),
            message: "connection refused".to_string(),
        };
        let unknown = RequestError::Unknown {
            url: "u".to_string(),
            message: "?".to_string(),
        };
        assert_eq!(network.classify(), TransientFailure::NetworkUnavailable);
        assert_eq!(unknown.classify(), TransientFailure::NetworkUnavailable);
        assert_eq!(network.status(), None);
    }

    #[test]
    fn test_network_marker_in_message() {
        let err = status_error(500, "net::ERR_INSUFFICIENT_RESOURCES");
        assert!(err.is_transient());
        assert!(err.should_retry(0, 3));

        // Marker makes it transient, but a 4xx status still blocks the retry
        let err = status_error(400, "ERR_NETWORK");
        assert!(err.is_transient());
        assert!(!err.should_retry(0, 3));
    }

    #[test]
    fn test_decode_is_never_transient() {
        let err = RequestError::Decode {
            url: "u".to_string(),
            status: 200,
            message: "ERR_NETWORK".to_string(),
        };
        assert!(!err.is_transient());
        assert!(!err.should_retry(0, 3));
    }

    #[test]
    fn test_invalid_request_is_never_transient() {
        let err = RequestError::InvalidRequest {
            url: "contracts".to_string(),
            message: "relative path without base_url".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.classify(), TransientFailure::NonTransient);
        assert!(!err.should_retry(0, 3));
    }

    #[test]
    fn test_should_retry_respects_budget() {
        let err = status_error(503, "Service Unavailable");
        assert!(err.should_retry(0, 3));
        assert!(err.should_retry(2, 3));
        assert!(!err.should_retry(3, 3));
        assert!(!err.should_retry(0, 0));
    }

    #[test]
    fn test_plain_500_is_not_retried() {
        assert!(!status_error(500, "Internal Server Error").should_retry(0, 3));
    }

    #[test]
    fn test_accessors() {
        let err = status_error(503, "busy");
        assert_eq!(err.url(), "https://api.test/contracts");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.message(), "busy");
        assert_eq!(
            err.to_string(),
            "request to https://api.test/contracts failed with status 503: busy"
        );
    }
}
