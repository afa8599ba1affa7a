use crate::error::AppError;

/// Source-local failures. Each one degrades a single source to zero items.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse failure: {0}")]
    Parse(String),
}

impl FeedError {
    /// Short failure class used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::HttpStatus(_) => "http_error",
            Self::Network(_) => "network_error",
            Self::Parse(_) => "parse_failure",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<NewsServiceError> for AppError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
