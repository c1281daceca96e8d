//! Supported content languages

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::CampusEventsError;

/// Languages event content is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Bn,
    Gu,
    Mr,
    Ta,
}

/// Per-language text, keyed by language
pub type LanguageMap = BTreeMap<Language, String>;

impl Language {
    /// The always-present source language
    pub const CANONICAL: Language = Language::En;

    /// Languages the translation provider is asked for
    pub const TARGETS: [Language; 5] = [
        Language::Hi,
        Language::Bn,
        Language::Gu,
        Language::Mr,
        Language::Ta,
    ];

    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Hi,
        Language::Bn,
        Language::Gu,
        Language::Mr,
        Language::Ta,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Gu => "gu",
            Language::Mr => "mr",
            Language::Ta => "ta",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CampusEventsError::Validation(format!("Unsupported language: {}", s)))
    }
}
