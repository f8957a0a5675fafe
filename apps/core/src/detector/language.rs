//! Script-based language detection.
//!
//! Kazakh is checked before Russian: Kazakh Cyrillic is a superset of the
//! Russian alphabet, so only its extra letters tell the two apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Working language used to select rules and explanation templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageTag {
    English,
    Russian,
    Kazakh,
    Unknown,
}

/// Language used when the script gives nothing to go on.
pub const FALLBACK_LANGUAGE: LanguageTag = LanguageTag::English;

/// Letters of the Kazakh alphabet that standard Russian Cyrillic lacks.
const KAZAKH_LETTERS: &[char] = &[
    'ә', 'ғ', 'і', 'қ', 'ң', 'ө', 'ұ', 'ү', 'һ', 'Ә', 'Ғ', 'І', 'Қ', 'Ң', 'Ө', 'Ұ', 'Ү', 'Һ',
];

impl LanguageTag {
    /// Languages that carry their own rules and templates.
    pub const SUPPORTED: [LanguageTag; 3] =
        [LanguageTag::English, LanguageTag::Russian, LanguageTag::Kazakh];

    /// Returns the short language code
    pub fn code(&self) -> &'static str {
        match self {
            LanguageTag::English => "en",
            LanguageTag::Russian => "ru",
            LanguageTag::Kazakh => "kk",
            LanguageTag::Unknown => "unknown",
        }
    }

    /// Resolves `Unknown` to the fallback working language.
    pub fn working(self) -> LanguageTag {
        match self {
            LanguageTag::Unknown => FALLBACK_LANGUAGE,
            other => other,
        }
    }

    /// Parses a language name as returned by a remote model ("English", "Russian"...).
    /// Anything unrecognised maps to `Unknown`.
    pub fn from_name(name: &str) -> LanguageTag {
        name.parse().unwrap_or(LanguageTag::Unknown)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(LanguageTag::English),
            "ru" | "rus" | "russian" | "русский" => Ok(LanguageTag::Russian),
            "kk" | "kz" | "kaz" | "kazakh" | "қазақша" | "қазақ" => Ok(LanguageTag::Kazakh),
            "unknown" => Ok(LanguageTag::Unknown),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}') && c.is_alphabetic()
}

/// Detect the working language of `text` from its character distribution.
///
/// Never fails and never returns `Unknown`: text without Cyrillic letters,
/// including empty text, is tagged with [`FALLBACK_LANGUAGE`].
pub fn detect(text: &str) -> LanguageTag {
    let mut saw_cyrillic = false;

    for c in text.chars() {
        if KAZAKH_LETTERS.contains(&c) {
            return LanguageTag::Kazakh;
        }
        if !saw_cyrillic && is_cyrillic(c) {
            saw_cyrillic = true;
        }
    }

    if saw_cyrillic {
        LanguageTag::Russian
    } else {
        FALLBACK_LANGUAGE
    }
}
