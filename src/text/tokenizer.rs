//! Tokenization strategies keyed by script family.
//!
//! CJK lines are tokenized per character, while Latin-family lines are split
//! on whitespace and punctuation. The CJK strategy can be swapped for an
//! external word segmenter through `TokenizerSet::with_cjk_segmenter`, or for a
//! single language through `TokenizerSet::with_language_tokenizer`.

use crate::language::{LanguageCode, ScriptFamily};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A tokenization strategy.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

// Token patterns (compiled once)
static CJK_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

/// One token per Han, kana or Hangul character.
///
/// Runs of any other letters or digits stay together, so an English word
/// embedded in a Korean line comes out as a single token.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let regex = CJK_TOKEN_REGEX.get_or_init(|| {
            Regex::new(
                r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]|[[\p{L}\p{M}\p{N}]--[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]]+",
            )
            .unwrap()
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Splits on whitespace and punctuation boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let regex = WORD_TOKEN_REGEX
            .get_or_init(|| Regex::new(r"[\p{L}\p{M}\p{N}]+(?:['’][\p{L}\p{M}\p{N}]+)*").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Dispatches to a tokenizer by the script family of the language.
#[derive(Clone)]
pub struct TokenizerSet {
    cjk: Arc<dyn Tokenizer>,
    latin: Arc<dyn Tokenizer>,
    overrides: HashMap<LanguageCode, Arc<dyn Tokenizer>>,
}

impl TokenizerSet {
    pub fn new() -> Self {
        Self {
            cjk: Arc::new(CharacterTokenizer),
            latin: Arc::new(WordTokenizer),
            overrides: HashMap::new(),
        }
    }

    /// Replace the character-wise CJK strategy with a word segmenter.
    pub fn with_cjk_segmenter(mut self, segmenter: Arc<dyn Tokenizer>) -> Self {
        self.cjk = segmenter;
        self
    }

    /// Use `tokenizer` for one language only, ahead of its script family's strategy.
    pub fn with_language_tokenizer(
        mut self,
        language: LanguageCode,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Self {
        self.overrides.insert(language, tokenizer);
        self
    }

    pub fn for_language(&self, language: LanguageCode) -> &dyn Tokenizer {
        if let Some(tokenizer) = self.overrides.get(&language) {
            return tokenizer.as_ref();
        }
        match language.script_family() {
            ScriptFamily::Cjk => self.cjk.as_ref(),
            ScriptFamily::Latin => self.latin.as_ref(),
        }
    }

    /// Tokenize `text` with the strategy for `language`.
    pub fn tokenize(&self, text: &str, language: LanguageCode) -> Vec<String> {
        self.for_language(language).tokenize(text)
    }
}

impl Default for TokenizerSet {
    fn default() -> Self {
        Self::new()
    }
}
