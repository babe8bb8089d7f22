//! Banner options carried in the query string of the script URL
//!
//! The page includes the widget as e.g.
//! `https://cdn.example/cookiebar/cookiebar.min.js?top=1&privacyPage=%2Fprivacy`.
//! The options are read once and never change for the page's lifetime.

use crate::error::Result;
use crate::types::{DEFAULT_REMEMBER_DAYS, MAX_REMEMBER_DAYS};
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerConfiguration {
    /// Show the reject control and its warning text.
    pub show_no_consent: bool,
    /// Open the detail prompt as a blocking overlay.
    pub blocking: bool,
    pub thirdparty: bool,
    pub tracking: bool,
    pub hide_details_btn: bool,
    /// Accept implicitly once the visitor scrolls far enough.
    pub scrolling: bool,
    /// Anchor the bar to the top edge instead of the bottom.
    pub top: bool,
    /// Decoded privacy policy URL.
    pub privacy_page: Option<String>,
    pub show_policy_link: bool,
    /// Consent cookie lifetime in days, at most [`MAX_REMEMBER_DAYS`].
    pub remember: u32,
    /// Reload the page after consent is given.
    pub refresh_page: bool,
    pub theme: Option<String>,
    #[serde(skip)]
    script_url: Url,
}

impl BannerConfiguration {
    pub fn from_script_url(script_url: &str) -> Result<Self> {
        let url = Url::parse(script_url)?;
        Ok(Self::from_url(url))
    }

    pub fn from_url(script_url: Url) -> Self {
        let param = |name: &str| -> Option<String> {
            script_url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        let flag = |name: &str| is_enabled(param(name).as_deref());
        let non_empty = |name: &str| param(name).filter(|v| !v.is_empty());

        let remember = param("remember")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|days| u32::try_from(days).unwrap_or(MAX_REMEMBER_DAYS).min(MAX_REMEMBER_DAYS))
            .unwrap_or(DEFAULT_REMEMBER_DAYS);

        Self {
            show_no_consent: flag("showNoConsent"),
            blocking: flag("blocking"),
            thirdparty: flag("thirdparty"),
            tracking: flag("tracking"),
            hide_details_btn: flag("hideDetailsBtn"),
            scrolling: flag("scrolling"),
            top: flag("top"),
            privacy_page: non_empty("privacyPage"),
            show_policy_link: flag("showPolicyLink"),
            remember,
            refresh_page: flag("refreshPage"),
            theme: non_empty("theme"),
            script_url,
        }
    }

    pub fn script_url(&self) -> &Url {
        &self.script_url
    }

    /// The script was served minified; companion assets follow suit.
    pub fn is_minified(&self) -> bool {
        self.script_url.path().contains(".min")
    }

    /// `<base>/themes/cookiebar[-theme][.min].css`
    pub fn stylesheet_url(&self) -> Result<Url> {
        let theme = self
            .theme
            .as_deref()
            .map(|t| format!("-{t}"))
            .unwrap_or_default();
        let minified = if self.is_minified() { ".min" } else { "" };
        Ok(self
            .script_url
            .join(&format!("themes/cookiebar{theme}{minified}.css"))?)
    }

    /// `<base>/lang/<code>.html`
    pub fn fragment_url(&self, language: &str) -> Result<Url> {
        Ok(self.script_url.join(&format!("lang/{language}.html"))?)
    }

    /// The main bar links to the privacy page only when both options are set.
    pub fn shows_main_policy_link(&self) -> bool {
        self.show_policy_link && self.privacy_page.is_some()
    }
}

/// Present with a non-empty value that isn't an explicit "off".
fn is_enabled(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
    }
}
