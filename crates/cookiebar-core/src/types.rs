//! Core types for Cookiebar

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the cookie holding the consent record.
pub const CONSENT_COOKIE: &str = "cookiebar";

/// Lifetime of the consent cookie when `remember` is not configured.
pub const DEFAULT_REMEMBER_DAYS: u32 = 30;

/// Longest lifetime the consent cookie is written with. Larger `remember`
/// values are clamped to it so the expiry stays a four-digit-year HTTP date.
pub const MAX_REMEMBER_DAYS: u32 = 36_500;

/// Countries where consent has to be asked for explicitly.
pub const JURISDICTION_STATES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "GB", "HR", "HU",
    "IE", "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT",
];

/// Whether a visitor from `country_code` must be prompted.
pub fn requires_consent(country_code: &str) -> bool {
    let code = country_code.trim();
    JURISDICTION_STATES
        .iter()
        .any(|state| state.eq_ignore_ascii_case(code))
}

/// Value of the persisted consent record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConsentValue {
    #[serde(rename = "CookieAllowed")]
    Allowed,
    #[serde(rename = "CookieDisallowed")]
    Disallowed,
}

impl ConsentValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "CookieAllowed",
            Self::Disallowed => "CookieDisallowed",
        }
    }

    /// Parse a decoded cookie value. Anything but the two known values is `None`.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        match value {
            "CookieAllowed" => Some(Self::Allowed),
            "CookieDisallowed" => Some(Self::Disallowed),
            _ => None,
        }
    }
}

impl fmt::Display for ConsentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a jurisdiction determination for one page load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionVerdict {
    MustPrompt,
    NoPromptNeeded,
    Unknown,
}

impl JurisdictionVerdict {
    pub fn from_country_code(code: &str) -> Self {
        if requires_consent(code) {
            Self::MustPrompt
        } else {
            Self::NoPromptNeeded
        }
    }

    /// `Unknown` fails open to prompting.
    pub fn requires_prompt(&self) -> bool {
        !matches!(self, Self::NoPromptNeeded)
    }
}

/// Why the banner is not shown on this load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// A consent record already exists.
    AlreadyAnswered,
    /// The visitor is outside the consent jurisdiction; consent was assumed.
    OutsideJurisdiction,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    MustPrompt,
    Suppressed(SuppressReason),
}

/// Result of resolving consent state, handed to the banner controller.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: Verdict,
    /// The page should be reloaded before anything else happens.
    pub reload: bool,
}

impl Resolution {
    pub fn must_prompt() -> Self {
        Self {
            verdict: Verdict::MustPrompt,
            reload: false,
        }
    }

    pub fn suppressed(reason: SuppressReason) -> Self {
        Self {
            verdict: Verdict::Suppressed(reason),
            reload: false,
        }
    }

    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    pub fn must_prompt_banner(&self) -> bool {
        matches!(self.verdict, Verdict::MustPrompt)
    }
}
