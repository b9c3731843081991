//! Language detection for a single line.
//!
//! # Architecture
//!
//! - `script`: character-range evidence (`CharacterScriptDetector`)
//! - `statistical`: the external classifier seam (`StatisticalDetector`) and its whatlang adapter
//! - `fusion`: the priority cascade merging both signals (`LanguageFusionEngine`)

mod fusion;
mod script;
mod statistical;

pub use fusion::{character_leader, CharacterLeader, DetectionResult, FusionTier, LanguageFusionEngine};
pub use script::{
    has_kana, in_language_range, is_han, is_hangul, is_kana, CharacterDistribution,
    CharacterScriptDetector,
};
pub use statistical::{Prediction, StatisticalDetector, WhatlangDetector};

#[cfg(test)]
pub(crate) mod testing {
    use super::{Prediction, StatisticalDetector};

    /// Detector answering from a closure, for deterministic tests.
    pub struct StubDetector<F>(pub F);

    impl<F> StatisticalDetector for StubDetector<F>
    where
        F: Fn(&str) -> Option<Prediction> + Send + Sync,
    {
        fn predict(&self, text: &str) -> Option<Prediction> {
            (self.0)(text)
        }
    }
}
