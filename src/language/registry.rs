//! Language registry: single source of truth for the supported languages.
//!
//! The registry holds the metadata for every language the scorer accepts. It is
//! built once on first access behind a `OnceLock` and is immutable afterwards.

use super::{LanguageCode, ScriptFamily};
use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language this entry describes
    pub code: LanguageCode,

    /// English name of the language (e.g., "Korean", "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "한국어", "Français")
    pub native_name: &'static str,

    /// Script family, which selects the tokenizer and word-leakage policy
    pub script: ScriptFamily,
}

/// Global language registry singleton.
///
/// Entries are stored in `LanguageCode::ALL` order so a code can index its own
/// entry directly.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language configuration by its ISO 639-1 code.
    ///
    /// Matching is exact: codes are lowercase two-letter strings.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code.code() == code)
    }

    /// Get the configuration for a validated language code.
    pub fn config(&self, code: LanguageCode) -> &LanguageConfig {
        &self.languages[code.index()]
    }

    /// All supported languages, in canonical order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Languages belonging to a script family.
    pub fn list_by_script(&self, script: ScriptFamily) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.script == script)
            .collect()
    }

    /// Check whether a code string names a supported language.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

fn entry(
    code: LanguageCode,
    name: &'static str,
    native_name: &'static str,
    script: ScriptFamily,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        script,
    }
}

/// Default language configurations, in `LanguageCode::ALL` order.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        entry(LanguageCode::Ko, "Korean", "한국어", ScriptFamily::Cjk),
        entry(LanguageCode::En, "English", "English", ScriptFamily::Latin),
        entry(LanguageCode::Zh, "Chinese", "中文", ScriptFamily::Cjk),
        entry(LanguageCode::Ja, "Japanese", "日本語", ScriptFamily::Cjk),
        entry(LanguageCode::Es, "Spanish", "Español", ScriptFamily::Latin),
        entry(LanguageCode::Fr, "French", "Français", ScriptFamily::Latin),
        entry(LanguageCode::De, "German", "Deutsch", ScriptFamily::Latin),
        entry(LanguageCode::It, "Italian", "Italiano", ScriptFamily::Latin),
        entry(LanguageCode::Pt, "Portuguese", "Português", ScriptFamily::Latin),
    ]
}
