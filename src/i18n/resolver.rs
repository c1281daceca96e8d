//! Localized field representation and resolution
//!
//! Event titles and descriptions are stored either as a per-language mapping or,
//! for rows written before content was translated, as a bare string. The shape is
//! decided once at deserialization; display code only ever calls [`resolve`].

use serde::{Deserialize, Serialize};
use super::language::{Language, LanguageMap};

/// A multilingual text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Legacy single-language value
    Plain(String),
    /// Text keyed by language code
    Localized(LanguageMap),
}

impl LocalizedText {
    /// Build a field from canonical text plus translated variants.
    ///
    /// Translations never overwrite the canonical entry, and blank
    /// translations are dropped.
    pub fn from_canonical(text: impl Into<String>, translations: LanguageMap) -> Self {
        let mut map: LanguageMap = translations
            .into_iter()
            .filter(|(lang, value)| *lang != Language::CANONICAL && !value.trim().is_empty())
            .collect();
        map.insert(Language::CANONICAL, text.into());
        LocalizedText::Localized(map)
    }

    /// The canonical (`en`) text, if any
    pub fn canonical(&self) -> Option<&str> {
        match self {
            LocalizedText::Plain(text) => Some(text.as_str()),
            LocalizedText::Localized(map) => map.get(&Language::CANONICAL).map(String::as_str),
        }
    }

    /// Text stored for an exact language, without fallback
    pub fn get(&self, lang: Language) -> Option<&str> {
        match self {
            LocalizedText::Plain(_) => None,
            LocalizedText::Localized(map) => map.get(&lang).map(String::as_str),
        }
    }

    /// Resolve the display string for a requested language code
    pub fn resolve(&self, requested: &str) -> String {
        resolve(self, requested)
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Localized(LanguageMap::new())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::Plain(text)
    }
}

/// Resolve the single string to display for `requested`.
///
/// Returns the requested variant when present and non-empty, then the canonical
/// variant, then an empty string. Legacy plain fields are returned unchanged.
pub fn resolve(field: &LocalizedText, requested: &str) -> String {
    match field {
        LocalizedText::Plain(text) => text.clone(),
        LocalizedText::Localized(map) => {
            let requested = requested.parse::<Language>().ok();
            requested
                .and_then(|lang| map.get(&lang))
                .filter(|text| !text.is_empty())
                .or_else(|| map.get(&Language::CANONICAL))
                .cloned()
                .unwrap_or_default()
        }
    }
}

/// Pick a supported language from a locale tag such as `ta-IN`
pub fn detect_language(locale: Option<&str>) -> Language {
    locale
        .and_then(|tag| tag.split(['-', '_']).next())
        .and_then(|code| code.parse::<Language>().ok())
        .unwrap_or(Language::CANONICAL)
}
