//! Language confusion scoring for multilingual text generation.
//!
//! Given a generated response and the language it was supposed to be written
//! in, the scorer decides the language of every line by fusing a statistical
//! classifier with Unicode character-range evidence, looks for English words
//! leaking into Chinese, Japanese and Korean lines, and reduces the results
//! into line-level rates and composite scores.
//!
//! ```no_run
//! use language_confusion::{ConfusionCalculator, ScoringConfig};
//!
//! let calculator = ConfusionCalculator::new(ScoringConfig::default()).unwrap();
//! let metrics = calculator
//!     .calculate("안녕하세요.\nI hope you have a great day!\n내일도 좋은 하루 되세요.", "ko")
//!     .unwrap();
//! println!("confusion: {:.2}", metrics.language_confusion_score);
//! ```

pub mod analyzer;
pub mod calculator;
pub mod config;
pub mod detection;
pub mod error;
pub mod language;
pub mod leakage;
pub mod metrics;
pub mod text;

pub use analyzer::{LineAnalyzer, LineRecord};
pub use calculator::{
    calculate_confusion_for_response, AnalysisSummary, ConfusionCalculator, LineAnalysis,
    ResponseAnalysis,
};
pub use config::{ScoreWeights, ScoringConfig};
pub use detection::{DetectionResult, FusionTier, Prediction, StatisticalDetector};
pub use error::{ConfusionError, Result};
pub use language::LanguageCode;
pub use leakage::{EnglishWordSet, WordLeakageDetector};
pub use metrics::{ConfusionAggregator, ConfusionMetrics};
#[cfg(feature = "jieba")]
pub use text::JiebaSegmenter;
