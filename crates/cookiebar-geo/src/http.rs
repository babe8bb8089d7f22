//! Geolocation over HTTP (freegeoip-style JSON endpoints)

use crate::locator::{GeoError, GeoResult, JurisdictionLocator};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://freegeoip.app/json/";

pub struct HttpLocator {
    client: Client,
    endpoint: String,
}

impl HttpLocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpLocator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait::async_trait]
impl JurisdictionLocator for HttpLocator {
    fn name(&self) -> &str { "http" }

    async fn country_code(&self) -> GeoResult<String> {
        debug!("Geolocation request: {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        // Only a plain 200 counts; anything else is undeterminable.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeoError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        parsed
            .country_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .ok_or_else(|| GeoError::InvalidResponse("missing country_code".into()))
    }
}

#[derive(Deserialize)]
struct GeoResponse {
    country_code: Option<String>,
}
