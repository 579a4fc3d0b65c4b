use std::fmt;

/// Errors from the remote fare service.
/// A missing credential is reported through the same type as a remote
/// rejection so callers have a single failure path.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No bearer credential available. Detected before any request is sent.
    MissingCredential,
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not what we expected.
    Parse(String),
}

impl ApiError {
    /// Text shown to the user. Remote messages are passed through verbatim.
    pub fn reason(&self) -> String {
        match self {
            ApiError::MissingCredential => "No token found".to_string(),
            ApiError::Network(msg) => msg.clone(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Parse(msg) => format!("Unexpected response: {msg}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingCredential => write!(f, "credential error: no token found"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
