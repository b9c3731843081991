//! Statistical language identification.
//!
//! The scorer treats the statistical classifier as an opaque collaborator
//! behind the `StatisticalDetector` trait. The built-in adapter wraps the
//! `whatlang` trigram classifier.

use crate::language::LanguageCode;
use serde::Serialize;
use whatlang::{Detector, Lang};

/// One prediction from a statistical classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw code reported by the classifier (ISO 639-1 for supported languages)
    pub code: String,

    /// The predicted language when it is one of the supported nine
    pub language: Option<LanguageCode>,

    /// Classifier probability in [0, 1]. NaN is passed through and ignored
    /// during fusion.
    pub probability: f64,
}

impl Prediction {
    /// Prediction for a supported language.
    pub fn supported(language: LanguageCode, probability: f64) -> Self {
        Self {
            code: language.code().to_string(),
            language: Some(language),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Prediction for a language outside the supported set.
    pub fn unsupported(code: impl Into<String>, probability: f64) -> Self {
        Self {
            code: code.into(),
            language: None,
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

/// Opaque statistical language classifier.
///
/// Returning `None` means the classifier could not decide (too little text,
/// internal failure). Callers degrade to character evidence in that case.
pub trait StatisticalDetector: Send + Sync {
    fn predict(&self, text: &str) -> Option<Prediction>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "statistical"
    }
}

/// `StatisticalDetector` backed by `whatlang`.
pub struct WhatlangDetector {
    detector: Detector,
}

impl WhatlangDetector {
    pub fn new() -> Self {
        Self {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticalDetector for WhatlangDetector {
    fn predict(&self, text: &str) -> Option<Prediction> {
        if text.trim().is_empty() {
            return None;
        }

        let info = self.detector.detect(text)?;
        let prediction = match supported_language(info.lang()) {
            Some(language) => Prediction::supported(language, info.confidence()),
            None => Prediction::unsupported(info.lang().code(), info.confidence()),
        };
        Some(prediction)
    }

    fn name(&self) -> &'static str {
        "whatlang"
    }
}

/// Map a whatlang language onto the supported set.
fn supported_language(lang: Lang) -> Option<LanguageCode> {
    match lang {
        Lang::Kor => Some(LanguageCode::Ko),
        Lang::Eng => Some(LanguageCode::En),
        Lang::Cmn => Some(LanguageCode::Zh),
        Lang::Jpn => Some(LanguageCode::Ja),
        Lang::Spa => Some(LanguageCode::Es),
        Lang::Fra => Some(LanguageCode::Fr),
        Lang::Deu => Some(LanguageCode::De),
        Lang::Ita => Some(LanguageCode::It),
        Lang::Por => Some(LanguageCode::Pt),
        _ => None,
    }
}
