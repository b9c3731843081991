//! English word leakage in CJK lines.
//!
//! Leakage is only looked for when the expected language is Chinese, Japanese
//! or Korean. Latin-family languages share their alphabet with English, so a
//! dictionary match there says nothing about confusion.

use crate::error::{ConfusionError, Result};
use crate::language::LanguageCode;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Lowercase English surface forms, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct EnglishWordSet {
    words: HashSet<String>,
}

impl EnglishWordSet {
    /// A word set with no entries. Leakage detection always comes back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a word set from individual entries.
    ///
    /// Entries are trimmed. Empty entries, entries containing uppercase
    /// letters (proper nouns, acronyms) and entries shorter than `min_length`
    /// characters are dropped.
    pub fn from_words<I, S>(words: I, min_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                is_dictionary_entry(word, min_length).then(|| word.to_string())
            })
            .collect();
        Self { words }
    }

    /// Load a line-delimited word list.
    pub fn load(path: &Path, min_length: usize) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfusionError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_words(contents.lines(), min_length);
        info!("Loaded {} English words from {}", set.len(), path.display());
        Ok(set)
    }

    /// Load a word list, falling back to an empty set when it is unavailable.
    pub fn load_or_empty(path: &Path, min_length: usize) -> Self {
        match Self::load(path, min_length) {
            Ok(set) => set,
            Err(e) => {
                warn!("{}. English word leakage detection is disabled", e);
                Self::empty()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn is_dictionary_entry(word: &str, min_length: usize) -> bool {
    !word.is_empty()
        && word.chars().count() >= min_length
        && word.chars().any(char::is_lowercase)
        && !word.chars().any(char::is_uppercase)
}

/// Finds English dictionary words among the tokens of a line.
#[derive(Debug, Clone)]
pub struct WordLeakageDetector {
    words: Arc<EnglishWordSet>,
}

impl WordLeakageDetector {
    pub fn new(words: Arc<EnglishWordSet>) -> Self {
        Self { words }
    }

    /// Whether a word list is loaded at all.
    pub fn is_available(&self) -> bool {
        !self.words.is_empty()
    }

    /// English words found in `tokens`, lowercased, in order of appearance.
    ///
    /// Every occurrence is reported. Returns nothing for Latin-family expected
    /// languages.
    pub fn find_english_leakage(&self, tokens: &[String], expected: LanguageCode) -> Vec<String> {
        if !expected.is_cjk() || !self.is_available() {
            return Vec::new();
        }

        tokens
            .iter()
            .map(|token| token.to_lowercase())
            .filter(|token| self.words.contains(token))
            .collect()
    }
}
