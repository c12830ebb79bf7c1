use std::fmt;

/// Unified error type for API and cache operations
#[derive(Debug)]
pub enum ApiError {
    /// Identifier is not a non-empty string of decimal digits
    InvalidIdentifier(String),
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response
    Parse(serde_json::Error),
    /// API answered with an error body or a non-success status
    Upstream(String),
    /// Cache or data-file read/write failed
    Io(std::io::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidIdentifier(id) => write!(f, "Invalid identifier: {:?}", id),
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Parse(e) => write!(f, "Parse error: {}", e),
            ApiError::Upstream(msg) => write!(f, "Error: {}", msg),
            ApiError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            ApiError::Parse(e) => Some(e),
            ApiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
