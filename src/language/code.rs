//! Language codes: the nine languages the scorer understands.

use super::{LanguageConfig, LanguageRegistry};
use crate::error::{ConfusionError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Script family of a language.
///
/// CJK languages are tokenized per character and are the only ones checked
/// for English word leakage. Latin-family languages share an alphabet with
/// English, so dictionary matching would only produce false positives there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFamily {
    Cjk,
    Latin,
}

/// A validated, supported language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Ko,
    En,
    Zh,
    Ja,
    Es,
    Fr,
    De,
    It,
    Pt,
}

impl LanguageCode {
    /// Every supported language, in canonical order.
    ///
    /// This order also breaks ties between equal character scores.
    pub const ALL: [LanguageCode; 9] = [
        LanguageCode::Ko,
        LanguageCode::En,
        LanguageCode::Zh,
        LanguageCode::Ja,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Pt,
    ];

    /// Create a language from its ISO 639-1 code.
    ///
    /// # Returns
    /// * `Ok(LanguageCode)` if the code is one of the supported languages
    /// * `Err(ConfusionError::UnsupportedLanguage)` otherwise
    ///
    /// # Example
    /// ```
    /// use language_confusion::LanguageCode;
    ///
    /// let korean = LanguageCode::from_code("ko").unwrap();
    /// assert!(korean.is_cjk());
    /// assert!(LanguageCode::from_code("ru").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<LanguageCode> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| config.code)
            .ok_or_else(|| ConfusionError::UnsupportedLanguage(code.to_string()))
    }

    /// The ISO 639-1 code (e.g., "ko", "pt").
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::Ko => "ko",
            LanguageCode::En => "en",
            LanguageCode::Zh => "zh",
            LanguageCode::Ja => "ja",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::It => "it",
            LanguageCode::Pt => "pt",
        }
    }

    /// Position of this language in `LanguageCode::ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Registry metadata for this language.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get().config(*self)
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn script_family(&self) -> ScriptFamily {
        self.config().script
    }

    /// Whether this is Chinese, Japanese or Korean.
    pub fn is_cjk(&self) -> bool {
        self.script_family() == ScriptFamily::Cjk
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = ConfusionError;

    fn from_str(s: &str) -> Result<Self> {
        LanguageCode::from_code(s)
    }
}
