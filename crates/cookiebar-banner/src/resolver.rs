//! Consent state resolution
//!
//! Decides, once per page load, whether the banner has to be shown. The
//! only suspension point is the optional jurisdiction lookup.

use cookiebar_core::config::JurisdictionConfig;
use cookiebar_core::{
    BannerConfiguration, ConsentStore, ConsentValue, JurisdictionMode, JurisdictionVerdict,
    Resolution, Result, SuppressReason,
};
use cookiebar_geo::{CancellationToken, JurisdictionLocator, JurisdictionLookup};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ConsentResolver {
    store: Arc<dyn ConsentStore>,
    /// `None` assumes every new visitor is in the consent jurisdiction.
    lookup: Option<JurisdictionLookup>,
}

impl ConsentResolver {
    /// Resolver that never geolocates.
    pub fn assume_eu(store: Arc<dyn ConsentStore>) -> Self {
        Self { store, lookup: None }
    }

    pub fn with_lookup(store: Arc<dyn ConsentStore>, lookup: JurisdictionLookup) -> Self {
        Self {
            store,
            lookup: Some(lookup),
        }
    }

    pub fn from_config(
        config: &JurisdictionConfig,
        store: Arc<dyn ConsentStore>,
        locator: Arc<dyn JurisdictionLocator>,
    ) -> Self {
        match config.mode {
            JurisdictionMode::AssumeEu => Self::assume_eu(store),
            JurisdictionMode::Lookup => Self::with_lookup(
                store,
                JurisdictionLookup::new(locator).with_timeout(config.timeout()),
            ),
        }
    }

    pub fn store(&self) -> Arc<dyn ConsentStore> {
        Arc::clone(&self.store)
    }

    pub async fn resolve(
        &self,
        config: &BannerConfiguration,
        cancel: Option<CancellationToken>,
    ) -> Result<Resolution> {
        let record = self.store.get()?;

        // A refusal survives the purge, explicitly re-written.
        if record == Some(ConsentValue::Disallowed) {
            debug!("Consent refused earlier - purging storage");
            self.store.clear()?;
            self.store.set(ConsentValue::Disallowed, config.remember)?;
        }

        let resolution = match record {
            None => self.resolve_unanswered(config, cancel).await?,
            Some(_) if self.store.has_any_data()? => {
                Resolution::suppressed(SuppressReason::AlreadyAnswered)
            }
            Some(_) => Resolution::must_prompt(),
        };

        info!("Consent resolved: {:?}", resolution);
        Ok(resolution)
    }

    async fn resolve_unanswered(
        &self,
        config: &BannerConfiguration,
        cancel: Option<CancellationToken>,
    ) -> Result<Resolution> {
        let Some(lookup) = &self.lookup else {
            return Ok(Resolution::must_prompt());
        };

        match lookup.determine(cancel).await {
            JurisdictionVerdict::NoPromptNeeded => {
                self.store.set(ConsentValue::Allowed, config.remember)?;
                Ok(Resolution::suppressed(SuppressReason::OutsideJurisdiction)
                    .with_reload(config.refresh_page))
            }
            JurisdictionVerdict::MustPrompt | JurisdictionVerdict::Unknown => {
                Ok(Resolution::must_prompt())
            }
        }
    }
}
