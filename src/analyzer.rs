//! Per-line analysis.
//!
//! `LineAnalyzer` runs tokenization, minimum-length filtering, character and
//! statistical detection, fusion and word leakage for one line. It keeps no
//! state between lines, so lines can be analyzed in any order or in parallel.

use crate::config::ScoringConfig;
use crate::detection::{
    CharacterDistribution, CharacterScriptDetector, DetectionResult, LanguageFusionEngine,
    StatisticalDetector,
};
use crate::language::LanguageCode;
use crate::leakage::{EnglishWordSet, WordLeakageDetector};
use crate::text::TokenizerSet;
use serde::Serialize;
use std::sync::Arc;

/// Result of analyzing one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub text: String,
    pub expected_language: LanguageCode,

    /// Fused decision; `None` for skipped lines and for lines with no usable
    /// signal at all
    pub detected: Option<DetectionResult>,

    pub is_correct: bool,

    /// English words found in a CJK-expected line, every occurrence in order
    pub english_words_found: Vec<String>,

    pub character_distribution: CharacterDistribution,
    pub token_count: usize,

    /// Below the minimum token threshold; excluded from every rate
    pub skipped: bool,
}

impl LineRecord {
    pub fn has_word_error(&self) -> bool {
        !self.english_words_found.is_empty()
    }

    /// Confidence of the decision, 0.0 when undetermined.
    pub fn confidence(&self) -> f64 {
        self.detected.map_or(0.0, |detected| detected.confidence)
    }
}

/// Analyzes single lines against an expected language.
#[derive(Clone)]
pub struct LineAnalyzer {
    pub(crate) tokenizers: TokenizerSet,
    pub(crate) statistical: Option<Arc<dyn StatisticalDetector>>,
    pub(crate) leakage: WordLeakageDetector,
    script: CharacterScriptDetector,
    fusion: LanguageFusionEngine,
    minimum_token_threshold: usize,
}

impl LineAnalyzer {
    pub fn new(
        config: &ScoringConfig,
        statistical: Option<Arc<dyn StatisticalDetector>>,
        words: Arc<EnglishWordSet>,
    ) -> Self {
        Self {
            tokenizers: TokenizerSet::new(),
            statistical,
            leakage: WordLeakageDetector::new(words),
            script: CharacterScriptDetector::new(),
            fusion: LanguageFusionEngine::new(config),
            minimum_token_threshold: config.minimum_token_threshold,
        }
    }

    /// Whether a statistical classifier takes part in fusion.
    pub fn has_statistical_detector(&self) -> bool {
        self.statistical.is_some()
    }

    /// Name of the statistical classifier, if one is configured.
    pub fn statistical_detector_name(&self) -> Option<&'static str> {
        self.statistical.as_ref().map(|detector| detector.name())
    }

    pub fn analyze_line(&self, text: &str, expected: LanguageCode) -> LineRecord {
        let tokens = self.tokenizers.tokenize(text, expected);

        if tokens.len() < self.minimum_token_threshold {
            return LineRecord {
                text: text.to_string(),
                expected_language: expected,
                detected: None,
                is_correct: false,
                english_words_found: Vec::new(),
                character_distribution: CharacterDistribution::zero(),
                token_count: tokens.len(),
                skipped: true,
            };
        }

        let distribution = self.script.distribution(text);
        let prediction = self
            .statistical
            .as_ref()
            .and_then(|detector| detector.predict(text));
        let detected = self.fusion.decide(text, &distribution, prediction.as_ref());

        LineRecord {
            text: text.to_string(),
            expected_language: expected,
            detected,
            is_correct: detected.is_some_and(|d| d.language == expected),
            english_words_found: self.leakage.find_english_leakage(&tokens, expected),
            character_distribution: distribution,
            token_count: tokens.len(),
            skipped: false,
        }
    }
}
