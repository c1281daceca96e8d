//! Internationalization module
//!
//! Supported content languages and resolution of multilingual event fields
//! to a single display string.

pub mod language;
pub mod resolver;

pub use language::{Language, LanguageMap};
pub use resolver::{LocalizedText, resolve, detect_language};
