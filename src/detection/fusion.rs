//! Fusion of statistical and character evidence into one decision per line.
//!
//! The decision is a priority cascade rather than a blended score:
//!
//! 1. `StatisticalAccepted`: the classifier names a supported language with
//!    probability at or above the acceptance threshold, and character evidence
//!    for that language is within tolerance of the character leader.
//! 2. `CharacterOverride`: the character leader is a script-distinguishable
//!    language (ko, zh, ja) whose margin over the runner-up exceeds the
//!    dominance threshold, and the classifier disagrees or is silent.
//! 3. `StatisticalFallback` / `CharacterFallback`: the classifier's answer as-is
//!    when present, otherwise the character leader.
//!
//! With no supported prediction and no matching characters the line is
//! undetermined.
//!
//! The reported confidence is the score of whichever signal won. It is a fused
//! score in [0, 1], not a calibrated probability.

use super::script::{has_kana, CharacterDistribution};
use super::statistical::Prediction;
use crate::config::ScoringConfig;
use crate::language::LanguageCode;
use serde::Serialize;
use tracing::debug;

/// Which tier of the cascade produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionTier {
    StatisticalAccepted,
    CharacterOverride,
    StatisticalFallback,
    CharacterFallback,
}

/// The fused language decision for one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionResult {
    pub language: LanguageCode,

    /// Fused confidence in [0, 1]
    pub confidence: f64,

    pub tier: FusionTier,
}

impl DetectionResult {
    fn new(language: LanguageCode, confidence: f64, tier: FusionTier) -> Self {
        Self {
            language,
            confidence: confidence.clamp(0.0, 1.0),
            tier,
        }
    }
}

/// Strongest language by character evidence, after kanji disambiguation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterLeader {
    pub language: LanguageCode,
    pub score: f64,

    /// Distance to the best competing language
    pub margin: f64,
}

/// Merges character and statistical signals.
#[derive(Debug, Clone)]
pub struct LanguageFusionEngine {
    acceptance_threshold: f64,
    dominance_threshold: f64,
    agreement_tolerance: f64,
}

impl LanguageFusionEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            acceptance_threshold: config.statistical_acceptance_threshold,
            dominance_threshold: config.character_dominance_threshold,
            agreement_tolerance: config.character_agreement_tolerance,
        }
    }

    /// Decide the language of `text`.
    ///
    /// `statistical` is `None` when the classifier is unavailable or failed.
    /// Predictions for unsupported languages are treated the same way.
    pub fn decide(
        &self,
        text: &str,
        distribution: &CharacterDistribution,
        statistical: Option<&Prediction>,
    ) -> Option<DetectionResult> {
        // A non-finite probability counts as no statistical signal
        let statistical = statistical
            .filter(|prediction| prediction.probability.is_finite())
            .and_then(|prediction| prediction.language.map(|lang| (lang, prediction.probability)));
        let excluded = kanji_excluded(text);
        let leader = rank(distribution, excluded);

        if let Some((language, probability)) = statistical {
            if probability >= self.acceptance_threshold
                && self.characters_agree(language, distribution, excluded, leader)
            {
                return Some(DetectionResult::new(
                    language,
                    probability,
                    FusionTier::StatisticalAccepted,
                ));
            }
        }

        if let Some(leader) = leader {
            let disagrees = statistical.map_or(true, |(language, _)| language != leader.language);
            if disagrees && leader.language.is_cjk() && leader.margin > self.dominance_threshold {
                debug!(
                    "Character evidence overrides statistical signal: {} (margin {:.2})",
                    leader.language, leader.margin
                );
                return Some(DetectionResult::new(
                    leader.language,
                    leader.score,
                    FusionTier::CharacterOverride,
                ));
            }
        }

        match (statistical, leader) {
            (Some((language, probability)), _) => Some(DetectionResult::new(
                language,
                probability,
                FusionTier::StatisticalFallback,
            )),
            (None, Some(leader)) => Some(DetectionResult::new(
                leader.language,
                leader.score,
                FusionTier::CharacterFallback,
            )),
            (None, None) => None,
        }
    }

    fn characters_agree(
        &self,
        language: LanguageCode,
        distribution: &CharacterDistribution,
        excluded: LanguageCode,
        leader: Option<CharacterLeader>,
    ) -> bool {
        let score = if language == excluded {
            0.0
        } else {
            distribution.score(language)
        };
        match leader {
            Some(leader) => score + self.agreement_tolerance >= leader.score,
            None => true,
        }
    }
}

/// Rank languages by character score.
///
/// Kanji count for both Chinese and Japanese, so the pair is resolved first:
/// kana in the text rules Chinese out, otherwise Japanese is ruled out. Ties
/// go to the language earliest in `LanguageCode::ALL`.
pub fn character_leader(text: &str, distribution: &CharacterDistribution) -> Option<CharacterLeader> {
    rank(distribution, kanji_excluded(text))
}

/// The member of the Chinese/Japanese pair ruled out for this text.
fn kanji_excluded(text: &str) -> LanguageCode {
    if has_kana(text) {
        LanguageCode::Zh
    } else {
        LanguageCode::Ja
    }
}

fn rank(distribution: &CharacterDistribution, excluded: LanguageCode) -> Option<CharacterLeader> {
    if distribution.is_empty() {
        return None;
    }

    let mut ranked: Vec<(LanguageCode, f64)> = distribution
        .iter()
        .filter(|(language, _)| *language != excluded)
        .collect();
    // Stable sort keeps canonical order among equal scores
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (language, score) = *ranked.first()?;
    let runner_up = ranked.get(1).map_or(0.0, |(_, score)| *score);
    Some(CharacterLeader {
        language,
        score,
        margin: score - runner_up,
    })
}
