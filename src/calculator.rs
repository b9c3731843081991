//! Response-level scoring: normalization, per-line analysis and aggregation.

use crate::analyzer::{LineAnalyzer, LineRecord};
use crate::config::ScoringConfig;
use crate::detection::{StatisticalDetector, WhatlangDetector};
use crate::error::Result;
use crate::language::LanguageCode;
use crate::leakage::{EnglishWordSet, WordLeakageDetector};
use crate::metrics::{ConfusionAggregator, ConfusionMetrics};
#[cfg(feature = "jieba")]
use crate::text::JiebaSegmenter;
use crate::text::{normalize, split_lines, Tokenizer, TokenizerSet};
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// One line of a detailed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAnalysis {
    /// 1-based line number within the normalized response
    pub line_number: usize,

    #[serde(flatten)]
    pub record: LineRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub expected_language: LanguageCode,
    pub total_lines_analyzed: usize,
    pub language_confusion_score: f64,
    pub overall_accuracy: f64,
}

/// Metrics plus every line record, skipped lines included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseAnalysis {
    pub metrics: ConfusionMetrics,
    pub lines: Vec<LineAnalysis>,
    pub summary: AnalysisSummary,
}

/// Scores responses for language confusion.
///
/// A calculator is immutable once built and can be shared across threads.
#[derive(Clone)]
pub struct ConfusionCalculator {
    config: ScoringConfig,
    analyzer: LineAnalyzer,
    aggregator: ConfusionAggregator,
}

/// Process-wide default calculator (initialized lazily)
static DEFAULT_CALCULATOR: OnceLock<ConfusionCalculator> = OnceLock::new();

impl ConfusionCalculator {
    /// Build a calculator from a configuration.
    ///
    /// Loads the English word list from `config.words_file` (an unreadable
    /// list disables leakage detection) and sets up the whatlang classifier
    /// unless statistical detection is turned off.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The process-wide calculator, built once from the environment.
    ///
    /// Invalid environment settings fall back to the defaults.
    pub fn global() -> &'static ConfusionCalculator {
        DEFAULT_CALCULATOR.get_or_init(|| {
            let config = ScoringConfig::from_env().unwrap_or_else(|e| {
                warn!("{}. Falling back to default scoring configuration", e);
                ScoringConfig::default()
            });
            let calculator = Self::build(config);
            info!(
                "Initialized language confusion calculator (statistical detector: {})",
                calculator.statistical_detector_name().unwrap_or("none")
            );
            calculator
        })
    }

    // Expects a validated configuration
    fn build(config: ScoringConfig) -> Self {
        let words = Arc::new(EnglishWordSet::load_or_empty(
            &config.words_file,
            config.min_english_word_length,
        ));
        let statistical: Option<Arc<dyn StatisticalDetector>> = if config.statistical_detection {
            Some(Arc::new(WhatlangDetector::new()))
        } else {
            warn!("Statistical detection disabled, using character evidence only");
            None
        };

        let mut analyzer = LineAnalyzer::new(&config, statistical, words);
        if config.chinese_segmentation {
            analyzer.tokenizers = chinese_segmentation(analyzer.tokenizers);
        }

        Self {
            analyzer,
            aggregator: ConfusionAggregator::new(config.weights),
            config,
        }
    }

    /// Replace the English word list.
    pub fn with_word_set(mut self, words: Arc<EnglishWordSet>) -> Self {
        self.analyzer.leakage = WordLeakageDetector::new(words);
        self
    }

    /// Replace the statistical classifier.
    pub fn with_statistical_detector(mut self, detector: Arc<dyn StatisticalDetector>) -> Self {
        self.analyzer.statistical = Some(detector);
        self
    }

    /// Run in character-only mode.
    pub fn without_statistical_detector(mut self) -> Self {
        self.analyzer.statistical = None;
        self
    }

    /// Replace the CJK tokenization strategy (e.g., with a word segmenter).
    pub fn with_cjk_segmenter(mut self, segmenter: Arc<dyn Tokenizer>) -> Self {
        self.analyzer.tokenizers = self.analyzer.tokenizers.with_cjk_segmenter(segmenter);
        self
    }

    /// Replace the whole tokenizer set.
    pub fn with_tokenizers(mut self, tokenizers: TokenizerSet) -> Self {
        self.analyzer.tokenizers = tokenizers;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Name of the statistical classifier in use, `None` in character-only mode.
    pub fn statistical_detector_name(&self) -> Option<&'static str> {
        self.analyzer.statistical_detector_name()
    }

    /// Compute confusion metrics for a response.
    ///
    /// # Errors
    /// `ConfusionError::UnsupportedLanguage` if `expected_language` is not one
    /// of the supported codes. Nothing else fails: an empty response yields the
    /// no-evidence metrics.
    pub fn calculate(&self, response: &str, expected_language: &str) -> Result<ConfusionMetrics> {
        let expected = LanguageCode::from_code(expected_language)?;
        let records: Vec<LineRecord> = self
            .analyze_lines(response, expected)
            .into_iter()
            .map(|line| line.record)
            .collect();
        Ok(self.aggregator.aggregate(&records, expected))
    }

    /// Compute metrics together with the per-line breakdown.
    pub fn analyze_response(
        &self,
        response: &str,
        expected_language: &str,
    ) -> Result<ResponseAnalysis> {
        let expected = LanguageCode::from_code(expected_language)?;
        let lines = self.analyze_lines(response, expected);
        let records: Vec<LineRecord> = lines.iter().map(|line| line.record.clone()).collect();
        let metrics = self.aggregator.aggregate(&records, expected);

        let summary = AnalysisSummary {
            expected_language: expected,
            total_lines_analyzed: metrics.total_lines,
            language_confusion_score: metrics.language_confusion_score,
            overall_accuracy: metrics.line_accuracy,
        };

        Ok(ResponseAnalysis {
            metrics,
            lines,
            summary,
        })
    }

    /// Analyze every line of the normalized response.
    pub fn analyze_lines(&self, response: &str, expected: LanguageCode) -> Vec<LineAnalysis> {
        let normalized = normalize(response);

        split_lines(&normalized)
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let record = self.analyzer.analyze_line(line, expected);
                if record.skipped {
                    debug!("Line {}: skipped ({} tokens)", i + 1, record.token_count);
                } else if let Some(detected) = record.detected {
                    debug!(
                        "Line {}: {} via {:?} (confidence {:.2}, expected {})",
                        i + 1,
                        detected.language,
                        detected.tier,
                        detected.confidence,
                        expected
                    );
                } else {
                    debug!("Line {}: language undetermined", i + 1);
                }
                LineAnalysis {
                    line_number: i + 1,
                    record,
                }
            })
            .collect()
    }
}

#[cfg(feature = "jieba")]
fn chinese_segmentation(tokenizers: TokenizerSet) -> TokenizerSet {
    info!("Segmenting Chinese lines with jieba");
    tokenizers.with_language_tokenizer(LanguageCode::Zh, Arc::new(JiebaSegmenter::new()))
}

#[cfg(not(feature = "jieba"))]
fn chinese_segmentation(tokenizers: TokenizerSet) -> TokenizerSet {
    warn!("Chinese segmentation needs the jieba feature, tokenizing per character");
    tokenizers
}

/// Score a response with the process-wide calculator.
///
/// # Example
/// ```no_run
/// use language_confusion::calculate_confusion_for_response;
///
/// let metrics = calculate_confusion_for_response("今天天气很好，我们去公园散步吧。", "zh").unwrap();
/// assert!(metrics.line_pass_rate <= 1.0);
/// ```
pub fn calculate_confusion_for_response(
    response: &str,
    expected_language: &str,
) -> Result<ConfusionMetrics> {
    ConfusionCalculator::global().calculate(response, expected_language)
}
