#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Languages with a built-in skeleton. Anything else the judge accepts is
/// carried as `Language::Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum KnownLanguage {
    Java,
    Python,
    Cpp,
    Javascript,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Known(KnownLanguage),
    Other(String),
}

impl Language {
    pub fn parse(text: &str) -> Language {
        let lowered = text.trim().to_lowercase();
        if let Some(known) = KnownLanguage::iter().find(|e| return e.to_string() == lowered) {
            return Language::Known(known);
        }

        return Language::Other(text.trim().to_string());
    }

    pub fn known(&self) -> Option<KnownLanguage> {
        match self {
            Language::Known(known) => return Some(*known),
            Language::Other(_) => return None,
        }
    }
}

impl Default for Language {
    fn default() -> Language {
        return Language::Known(KnownLanguage::Python);
    }
}

impl From<KnownLanguage> for Language {
    fn from(known: KnownLanguage) -> Language {
        return Language::Known(known);
    }
}

impl From<String> for Language {
    fn from(text: String) -> Language {
        return Language::parse(&text);
    }
}

impl From<Language> for String {
    fn from(language: Language) -> String {
        return language.to_string();
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::Known(known) => return write!(f, "{known}"),
            Language::Other(name) => return write!(f, "{name}"),
        }
    }
}
