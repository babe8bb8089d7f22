//! Jurisdiction locator trait

/// Result type for locator operations
pub type GeoResult<T> = Result<T, GeoError>;

/// Locator error types
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("lookup returned status {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("lookup timed out after {0}ms")]
    Timeout(u64),

    #[error("cancelled")]
    Cancelled,

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl From<GeoError> for cookiebar_core::Error {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::Status(status) => Self::non_success("jurisdiction lookup", status),
            GeoError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            GeoError::Timeout(timeout_ms) => Self::NetworkTimeout { timeout_ms },
            GeoError::Cancelled => Self::Network("jurisdiction lookup cancelled".into()),
            GeoError::NetworkError(e) => Self::Network(e.to_string()),
        }
    }
}

/// Something that can tell which country the visitor is in.
#[async_trait::async_trait]
pub trait JurisdictionLocator: Send + Sync {
    fn name(&self) -> &str;

    /// ISO 3166 alpha-2 country code of the visitor.
    async fn country_code(&self) -> GeoResult<String>;
}

/// Always answers with the same country. Used when the country is already
/// known, e.g. passed on the command line.
pub struct StaticLocator {
    country_code: String,
}

impl StaticLocator {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }
}

#[async_trait::async_trait]
impl JurisdictionLocator for StaticLocator {
    fn name(&self) -> &str { "static" }

    async fn country_code(&self) -> GeoResult<String> {
        Ok(self.country_code.clone())
    }
}
