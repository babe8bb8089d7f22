//! Banner language negotiation

/// Languages a banner fragment exists for.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ca", "cs", "da", "de", "el", "en", "es", "fr", "hu", "it", "nl", "pl", "pt", "ro", "ru",
    "se", "sk", "sl",
];

pub const FALLBACK_LANGUAGE: &str = "en";

/// Pick the fragment language.
///
/// A fixed language wins over the visitor's locale. Only the two-letter
/// primary subtag is considered (`de-AT` and `de,en;q=0.8` both give `de`);
/// anything outside [`SUPPORTED_LANGUAGES`] falls back to `en`.
pub fn negotiate_language(fixed: Option<&str>, locale: Option<&str>) -> &'static str {
    let requested = fixed
        .filter(|l| !l.trim().is_empty())
        .or(locale)
        .unwrap_or(FALLBACK_LANGUAGE)
        .trim();

    let primary: String = requested
        .chars()
        .take(2)
        .collect::<String>()
        .to_ascii_lowercase();

    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| **lang == primary)
        .copied()
        .unwrap_or(FALLBACK_LANGUAGE)
}
