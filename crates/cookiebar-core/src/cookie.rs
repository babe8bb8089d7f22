//! Cookie jar model and consent cookie codec
//!
//! Mirrors what a browser document exposes: cookies are written one
//! `name=value; expires=...;path=/` assignment at a time and read back as a
//! single `a=1; b=2` string. Writing an assignment whose expiry is not in the
//! future deletes the cookie.

use crate::error::{Error, Result};
use crate::types::{ConsentValue, CONSENT_COOKIE, MAX_REMEMBER_DAYS};
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(true, |at| at > now)
    }
}

/// Cookies plus local storage of one origin.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Jar {
    cookies: BTreeMap<String, StoredCookie>,
    local_storage: BTreeMap<String, String>,
}

impl Jar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `document.cookie = ...` style assignment.
    pub fn assign(&mut self, assignment: &str, now: DateTime<Utc>) -> Result<()> {
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::Store(format!("malformed cookie assignment: {assignment}")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Store(format!("cookie without a name: {assignment}")));
        }

        let mut cookie = StoredCookie {
            value: value.trim().to_string(),
            expires: None,
            path: "/".into(),
        };
        for attr in parts {
            let Some((key, val)) = attr.split_once('=') else { continue };
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => cookie.expires = Some(parse_http_date(val.trim())?),
                "path" => cookie.path = val.trim().to_string(),
                _ => {}
            }
        }

        if cookie.is_live(now) {
            self.cookies.insert(name.to_string(), cookie);
        } else {
            self.cookies.remove(name);
        }
        Ok(())
    }

    /// The `a=1; b=2` view of every unexpired cookie.
    pub fn document_cookie(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|(_, c)| c.is_live(now))
            .map(|(name, c)| format!("{}={}", name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn set_local_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.local_storage.insert(key.into(), value.into());
    }

    pub fn local_len(&self) -> usize {
        self.local_storage.len()
    }

    /// True when any unexpired cookie or local storage entry exists.
    pub fn has_any_data(&self, now: DateTime<Utc>) -> bool {
        !self.local_storage.is_empty() || self.cookies.values().any(|c| c.is_live(now))
    }

    /// Expire every cookie and wipe local storage.
    pub fn purge(&mut self, now: DateTime<Utc>) -> Result<()> {
        let names: Vec<String> = self.cookies.keys().cloned().collect();
        for name in names {
            self.assign(&format!("{name}=;expires={};path=/", format_http_date(now)), now)?;
        }
        self.local_storage.clear();
        Ok(())
    }

    /// Read the consent record. Unknown values read as absent.
    pub fn consent(&self, now: DateTime<Utc>) -> Option<ConsentValue> {
        let raw = read_cookie(&self.document_cookie(now), CONSENT_COOKIE)?;
        let value = ConsentValue::from_cookie_value(&raw);
        if value.is_none() {
            tracing::warn!("Ignoring unrecognized {} cookie value: {:?}", CONSENT_COOKIE, raw);
        }
        value
    }

    pub fn set_consent(
        &mut self,
        value: ConsentValue,
        remember_days: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.assign(&consent_assignment(value, remember_days, now)?, now)
    }
}

/// Build the assignment persisting `value` for `remember_days`, capped at
/// [`MAX_REMEMBER_DAYS`].
pub fn consent_assignment(
    value: ConsentValue,
    remember_days: u32,
    now: DateTime<Utc>,
) -> Result<String> {
    let days = remember_days.min(MAX_REMEMBER_DAYS);
    let expires = TimeDelta::try_days(i64::from(days))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .filter(|at| at.year() <= 9999)
        .ok_or_else(|| Error::Store(format!("consent expiry out of range: {days} days from {now}")))?;
    Ok(format!(
        "{}={}; expires={};path=/",
        CONSENT_COOKIE,
        urlencoding::encode(value.as_str()),
        format_http_date(expires)
    ))
}

/// Find `name` in a `document.cookie` string and URI-decode its value.
pub fn read_cookie(document_cookie: &str, name: &str) -> Option<String> {
    document_cookie.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key.trim() != name {
            return None;
        }
        Some(
            urlencoding::decode(value.trim())
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.trim().to_string()),
        )
    })
}

pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE).to_string()
}

pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Store(format!("bad cookie expiry {value:?}: {e}")))
}
