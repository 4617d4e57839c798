use thiserror::Error;

/// Longest raw-body excerpt carried in a `MalformedResponse`.
pub const EXCERPT_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Backend responded with status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed backend response: {reason}")]
    MalformedResponse { reason: String, excerpt: String },

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl BackendError {
    pub fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        BackendError::MalformedResponse {
            reason: reason.into(),
            excerpt: excerpt(raw),
        }
    }

    /// Whether the backend was unavailable rather than wrong.
    pub fn is_outage(&self) -> bool {
        matches!(self, BackendError::Transport(_) | BackendError::UpstreamStatus { .. })
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Transport(format!("request timed out: {}", e))
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// First `EXCERPT_LIMIT` characters of `raw`, cut on a char boundary.
pub fn excerpt(raw: &str) -> String {
    match raw.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
