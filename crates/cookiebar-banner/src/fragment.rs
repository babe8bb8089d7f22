//! Localized banner fragments
//!
//! A fragment is an HTML snippet per language (`lang/<code>.html` next to the
//! script) carrying every [`Element`] id. Fetching goes through
//! [`FragmentSource`] so the controller can be driven from the network or a
//! local directory.

use crate::element::Element;
use cookiebar_core::{Error, Result};
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

#[derive(Clone, Debug)]
pub struct BannerFragment {
    html: String,
    no_consent_text: String,
}

impl BannerFragment {
    /// Parse a fragment, rejecting it if any required element is missing.
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_fragment(html);
        let mut no_consent_text = String::new();

        for element in Element::ALL {
            let selector = Selector::parse(&format!("#{}", element.id()))
                .map_err(|e| Error::InvalidResponse(format!("selector {}: {:?}", element, e)))?;
            let found = document
                .select(&selector)
                .next()
                .ok_or_else(|| Error::MissingElement(element.id().to_string()))?;
            if element == Element::NoConsent {
                no_consent_text = found.text().collect::<String>().trim().to_string();
            }
        }

        Ok(Self {
            html: html.to_string(),
            no_consent_text,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Warning shown before consent is declined.
    pub fn no_consent_text(&self) -> &str {
        &self.no_consent_text
    }
}

#[async_trait::async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetch the fragment at `url`. Anything but a successful read is an error.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

pub struct HttpFragmentSource {
    client: Client,
}

impl HttpFragmentSource {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFragmentSource {
    fn default() -> Self { Self::new() }
}

#[async_trait::async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("Fetching banner fragment {}", url);
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::non_success(url.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Error::fragment_unavailable(url.as_str(), e.to_string()))
    }
}

/// Serves fragments from `<root>/lang/<code>.html`, whatever host the URL names.
pub struct DirFragmentSource {
    root: PathBuf,
}

impl DirFragmentSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn local_path(&self, url: &Url) -> Option<PathBuf> {
        let segments: Vec<&str> = url.path_segments()?.collect();
        match segments.as_slice() {
            [.., dir, file] if !file.is_empty() => Some(self.root.join(dir).join(file)),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl FragmentSource for DirFragmentSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let path = self
            .local_path(url)
            .ok_or_else(|| Error::fragment_unavailable(url.as_str(), "no file in url path"))?;
        debug!("Reading banner fragment {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::fragment_unavailable(url.as_str(), e.to_string()))
    }
}
