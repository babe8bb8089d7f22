//! Error types for Cookiebar

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("jurisdiction lookup timed out after {timeout_ms}ms")]
    NetworkTimeout { timeout_ms: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status} from {url}")]
    NonSuccessStatus { url: String, status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("banner fragment unavailable: {url} - {reason}")]
    FragmentUnavailable { url: String, reason: String },

    #[error("banner fragment is missing element #{0}")]
    MissingElement(String),

    #[error("cancelled by user")]
    UserCancel,

    #[error("store error: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn non_success(url: impl Into<String>, status: u16) -> Self {
        Self::NonSuccessStatus {
            url: url.into(),
            status,
        }
    }

    pub fn fragment_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FragmentUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Failures that leave the hosting page untouched. Every variant
    /// except configuration and local I/O problems is recovered in place.
    pub fn is_soft(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Io(_) | Self::Store(_))
    }
}
