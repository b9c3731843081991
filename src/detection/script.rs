//! Character-range language evidence.
//!
//! Every supported language owns a set of Unicode ranges. The score of a
//! language over a span is the share of alphanumeric characters falling in its
//! set. Sets overlap on purpose: kanji count for both Chinese and Japanese, and
//! base Latin letters count for every Latin-family language.

use crate::language::LanguageCode;
use serde::ser::{Serialize, SerializeMap, Serializer};

const SPANISH_LETTERS: &str = "áéíóúüñÁÉÍÓÚÜÑ";
const FRENCH_LETTERS: &str = "àâæçéèêëîïôœùûüÿÀÂÆÇÉÈÊËÎÏÔŒÙÛÜŸ";
const GERMAN_LETTERS: &str = "äöüßÄÖÜ";
const ITALIAN_LETTERS: &str = "àèéìíîòóùúÀÈÉÌÍÎÒÓÙÚ";
const PORTUGUESE_LETTERS: &str = "áâãàçéêíóôõúÁÂÃÀÇÉÊÍÓÔÕÚ";

/// Per-language character-membership scores for one span.
///
/// Scores lie in [0, 1] and need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacterDistribution {
    scores: [f64; 9],
}

impl CharacterDistribution {
    /// Distribution with every score at zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Score for a single language.
    pub fn score(&self, language: LanguageCode) -> f64 {
        self.scores[language.index()]
    }

    /// `(language, score)` pairs in canonical language order.
    pub fn iter(&self) -> impl Iterator<Item = (LanguageCode, f64)> + '_ {
        LanguageCode::ALL
            .into_iter()
            .map(move |language| (language, self.score(language)))
    }

    /// True when no character matched any language.
    pub fn is_empty(&self) -> bool {
        self.scores.iter().all(|&score| score == 0.0)
    }
}

impl Serialize for CharacterDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (language, score) in self.iter() {
            map.serialize_entry(language.code(), &score)?;
        }
        map.end()
    }
}

/// Maps text spans to a `CharacterDistribution` using Unicode range rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterScriptDetector;

impl CharacterScriptDetector {
    pub fn new() -> Self {
        Self
    }

    /// Compute the character distribution of a span.
    ///
    /// A span without alphanumeric characters yields the zero distribution.
    pub fn distribution(&self, text: &str) -> CharacterDistribution {
        let mut counts = [0usize; 9];
        let mut total = 0usize;

        for c in text.chars().filter(|c| c.is_alphanumeric()) {
            total += 1;
            for language in LanguageCode::ALL {
                if in_language_range(language, c) {
                    counts[language.index()] += 1;
                }
            }
        }

        if total == 0 {
            return CharacterDistribution::zero();
        }

        let mut scores = [0.0; 9];
        for (score, count) in scores.iter_mut().zip(counts) {
            *score = (count as f64 / total as f64).clamp(0.0, 1.0);
        }
        CharacterDistribution { scores }
    }
}

/// Whether a character belongs to a language's defining range set.
pub fn in_language_range(language: LanguageCode, c: char) -> bool {
    match language {
        LanguageCode::Ko => is_hangul(c),
        LanguageCode::Zh => is_han(c),
        LanguageCode::Ja => is_kana(c) || is_han(c),
        LanguageCode::En => c.is_ascii_alphabetic(),
        LanguageCode::Es => c.is_ascii_alphabetic() || SPANISH_LETTERS.contains(c),
        LanguageCode::Fr => c.is_ascii_alphabetic() || FRENCH_LETTERS.contains(c),
        LanguageCode::De => c.is_ascii_alphabetic() || GERMAN_LETTERS.contains(c),
        LanguageCode::It => c.is_ascii_alphabetic() || ITALIAN_LETTERS.contains(c),
        LanguageCode::Pt => c.is_ascii_alphabetic() || PORTUGUESE_LETTERS.contains(c),
    }
}

pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7AF}' |  // Hangul Syllables
        '\u{1100}'..='\u{11FF}' |  // Hangul Jamo
        '\u{3130}'..='\u{318F}'    // Hangul Compatibility Jamo
    )
}

pub fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
        '\u{F900}'..='\u{FAFF}'    // CJK Compatibility Ideographs
    )
}

pub fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' |  // Hiragana
        '\u{30A0}'..='\u{30FF}' |  // Katakana
        '\u{FF66}'..='\u{FF9F}'    // Halfwidth Katakana
    )
}

/// Hiragana or Katakana anywhere in the text. Decisive evidence for Japanese.
pub fn has_kana(text: &str) -> bool {
    text.chars().any(is_kana)
}
