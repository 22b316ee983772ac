use std::fmt;

use async_trait::async_trait;

use super::types::{CategoryRequest, DashboardResponse};

/// Why a category sync or a navigation failed.
///
/// Every variant ends up in the same place: a log line. The split only
/// exists so the log says something useful.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Client misconfigured (unparseable base URL or target).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Config(msg) => write!(f, "config error: {msg}"),
            SyncError::Network(msg) => write!(f, "network error: {msg}"),
            SyncError::Timeout => write!(f, "request timed out"),
            SyncError::Api { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            SyncError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SyncError::Timeout
        } else if e.is_decode() {
            SyncError::Parse(e.to_string())
        } else if e.is_builder() {
            SyncError::Config(e.to_string())
        } else {
            SyncError::Network(e.to_string())
        }
    }
}

/// Sends the selected category to the dashboard.
#[async_trait]
pub trait CategorySync: Send + Sync {
    /// Returns the full URL requests are posted to (for logs and the title bar).
    fn endpoint(&self) -> &str;

    /// Posts `request` and returns the decoded response.
    async fn post_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<DashboardResponse, SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_display() {
        let err = SyncError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server error (HTTP 500): Internal Server Error"
        );
        assert_eq!(SyncError::Timeout.to_string(), "request timed out");
        assert_eq!(
            SyncError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
    }
}
