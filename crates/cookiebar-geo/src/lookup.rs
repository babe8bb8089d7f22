//! Deadline-bounded jurisdiction determination
//!
//! The locator call is raced against the deadline and an optional
//! cancellation token. Whichever loses is dropped, which aborts an
//! in-flight request and guarantees a single outcome.

use crate::locator::{GeoError, GeoResult, JurisdictionLocator};
use cookiebar_core::JurisdictionVerdict;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1500);

pub struct JurisdictionLookup {
    locator: Arc<dyn JurisdictionLocator>,
    timeout: Duration,
}

impl JurisdictionLookup {
    pub fn new(locator: Arc<dyn JurisdictionLocator>) -> Self {
        Self {
            locator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The deadline in whole milliseconds, saturating at `u64::MAX`.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Country code of the visitor, or why it couldn't be had in time.
    pub async fn country_code(&self, cancel: Option<CancellationToken>) -> GeoResult<String> {
        let cancel = cancel.unwrap_or_else(CancellationToken::new);
        tokio::select! {
            result = self.locator.country_code() => result,
            _ = tokio::time::sleep(self.timeout) => {
                warn!("cookiebar - timeout for ip geolocation ({})", self.locator.name());
                Err(GeoError::Timeout(self.timeout_ms()))
            }
            _ = cancel.cancelled() => Err(GeoError::Cancelled),
        }
    }

    /// Map the lookup onto a verdict. Every failure is `Unknown`.
    pub async fn determine(&self, cancel: Option<CancellationToken>) -> JurisdictionVerdict {
        match self.country_code(cancel).await {
            Ok(code) => {
                let verdict = JurisdictionVerdict::from_country_code(&code);
                debug!("Visitor country {} -> {:?}", code, verdict);
                verdict
            }
            Err(e) => {
                debug!("Jurisdiction undeterminable: {}", e);
                JurisdictionVerdict::Unknown
            }
        }
    }
}
