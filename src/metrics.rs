//! Confusion metrics: reduction of line records into rates and composite scores.
//!
//! Metrics are recomputed from scratch on every call. Only non-skipped records
//! contribute to counts and rates, and the reduction does not depend on record
//! order.

use crate::analyzer::LineRecord;
use crate::config::ScoreWeights;
use crate::language::LanguageCode;
use serde::Serialize;

/// Aggregate language-confusion metrics for one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMetrics {
    /// Number of scored (non-skipped) lines
    pub total_lines: usize,

    /// Scored lines whose detected language differs from the expected one
    pub lines_with_errors: usize,

    /// Scored lines containing English word leakage
    pub lines_with_word_errors: usize,

    /// Lines below the minimum token threshold
    pub skipped_lines: usize,

    /// Share of scored lines in the expected language (1.0 with no lines)
    pub line_accuracy: f64,

    /// Same definition as `line_accuracy`, kept as its own field
    pub line_pass_rate: f64,

    /// Share of CJK lines without leakage; `None` for Latin-family languages
    /// or when no CJK line was scored
    pub word_pass_rate: Option<f64>,

    /// Mean fused confidence of scored lines (0.0 with no lines)
    pub language_confidence: f64,

    /// `1 - line_pass_rate`
    pub language_confusion_score: f64,

    /// Weighted mean of the available components
    pub comprehensive_score: f64,

    /// Unweighted mean of the available components
    pub simple_comprehensive_score: f64,

    /// Largest available component
    pub max_comprehensive_score: f64,
}

/// Reduces line records into `ConfusionMetrics`.
#[derive(Debug, Clone)]
pub struct ConfusionAggregator {
    weights: ScoreWeights,
}

impl ConfusionAggregator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn aggregate(&self, records: &[LineRecord], expected: LanguageCode) -> ConfusionMetrics {
        let scored: Vec<&LineRecord> = records.iter().filter(|r| !r.skipped).collect();
        let total_lines = scored.len();
        let skipped_lines = records.len() - total_lines;

        let correct = scored.iter().filter(|r| r.is_correct).count();
        let lines_with_errors = total_lines - correct;
        let lines_with_word_errors = scored.iter().filter(|r| r.has_word_error()).count();

        let line_accuracy = ratio_or(correct, total_lines, 1.0);
        let line_pass_rate = line_accuracy;

        let word_pass_rate = if expected.is_cjk() {
            let cjk_lines: Vec<&&LineRecord> = scored
                .iter()
                .filter(|r| r.expected_language.is_cjk())
                .collect();
            let clean = cjk_lines.iter().filter(|r| !r.has_word_error()).count();
            (!cjk_lines.is_empty()).then(|| ratio_or(clean, cjk_lines.len(), 1.0))
        } else {
            None
        };

        let language_confidence = if total_lines == 0 {
            0.0
        } else {
            let sum: f64 = scored.iter().map(|r| r.confidence()).sum();
            (sum / total_lines as f64).clamp(0.0, 1.0)
        };

        let mut components = vec![
            (line_accuracy, self.weights.line_accuracy),
            (language_confidence, self.weights.language_confidence),
            (line_pass_rate, self.weights.line_pass_rate),
        ];
        if let Some(rate) = word_pass_rate {
            components.push((rate, self.weights.word_pass_rate));
        }

        ConfusionMetrics {
            total_lines,
            lines_with_errors,
            lines_with_word_errors,
            skipped_lines,
            line_accuracy,
            line_pass_rate,
            word_pass_rate,
            language_confidence,
            language_confusion_score: 1.0 - line_pass_rate,
            comprehensive_score: weighted_mean(&components),
            simple_comprehensive_score: simple_mean(&components),
            max_comprehensive_score: components
                .iter()
                .map(|(value, _)| *value)
                .fold(0.0, f64::max),
        }
    }
}

impl Default for ConfusionAggregator {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

fn ratio_or(count: usize, total: usize, empty: f64) -> f64 {
    if total == 0 {
        empty
    } else {
        (count as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// Weighted mean; dropping a component renormalizes the remaining weights.
fn weighted_mean(components: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = components.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return simple_mean(components);
    }
    let sum: f64 = components.iter().map(|(value, w)| value * w).sum();
    (sum / total_weight).clamp(0.0, 1.0)
}

fn simple_mean(components: &[(f64, f64)]) -> f64 {
    if components.is_empty() {
        return 0.0;
    }
    let sum: f64 = components.iter().map(|(value, _)| value).sum();
    (sum / components.len() as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{CharacterDistribution, DetectionResult, FusionTier};
    use proptest::prelude::*;

    fn record(
        expected: LanguageCode,
        detected: LanguageCode,
        confidence: f64,
        leaked: &[&str],
    ) -> LineRecord {
        LineRecord {
            text: String::new(),
            expected_language: expected,
            detected: Some(DetectionResult {
                language: detected,
                confidence,
                tier: FusionTier::StatisticalAccepted,
            }),
            is_correct: expected == detected,
            english_words_found: leaked.iter().map(|w| w.to_string()).collect(),
            character_distribution: CharacterDistribution::zero(),
            token_count: 5,
            skipped: false,
        }
    }

    fn skipped(expected: LanguageCode) -> LineRecord {
        LineRecord {
            text: "짧음".to_string(),
            expected_language: expected,
            detected: None,
            is_correct: false,
            english_words_found: Vec::new(),
            character_distribution: CharacterDistribution::zero(),
            token_count: 2,
            skipped: true,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== Empty Input Tests ====================

    #[test]
    fn test_no_lines_reports_no_evidence() {
        let metrics = ConfusionAggregator::default().aggregate(&[], LanguageCode::Ko);

        assert_eq!(metrics.total_lines, 0);
        assert_eq!(metrics.line_accuracy, 1.0);
        assert_eq!(metrics.line_pass_rate, 1.0);
        assert_eq!(metrics.language_confidence, 0.0);
        assert_eq!(metrics.word_pass_rate, None);
        assert_eq!(metrics.language_confusion_score, 0.0);
        // (0.4 * 1 + 0.3 * 0 + 0.2 * 1) / 0.9
        assert!(approx(metrics.comprehensive_score, 0.6 / 0.9));
        assert!(approx(metrics.simple_comprehensive_score, 2.0 / 3.0));
        assert_eq!(metrics.max_comprehensive_score, 1.0);
    }

    #[test]
    fn test_only_skipped_lines_is_empty() {
        let records = vec![skipped(LanguageCode::Ko), skipped(LanguageCode::Ko)];
        let metrics = ConfusionAggregator::default().aggregate(&records, LanguageCode::Ko);
        assert_eq!(metrics.total_lines, 0);
        assert_eq!(metrics.skipped_lines, 2);
        assert_eq!(metrics.line_accuracy, 1.0);
    }

    // ==================== Rate Tests ====================

    #[test]
    fn test_korean_response_with_english_line() {
        let ko = LanguageCode::Ko;
        let records = vec![
            record(ko, ko, 1.0, &[]),
            record(ko, ko, 1.0, &[]),
            record(ko, LanguageCode::En, 0.8, &["hope", "have", "great", "day"]),
            record(ko, ko, 1.0, &[]),
        ];
        let metrics = ConfusionAggregator::default().aggregate(&records, ko);

        assert_eq!(metrics.total_lines, 4);
        assert_eq!(metrics.lines_with_errors, 1);
        assert_eq!(metrics.lines_with_word_errors, 1);
        assert_eq!(metrics.line_accuracy, 0.75);
        assert_eq!(metrics.line_pass_rate, 0.75);
        assert_eq!(metrics.language_confusion_score, 0.25);
        assert_eq!(metrics.word_pass_rate, Some(0.75));
        assert!(approx(metrics.language_confidence, 0.95));

        let expected = 0.4 * 0.75 + 0.3 * 0.95 + 0.2 * 0.75 + 0.1 * 0.75;
        assert!(approx(metrics.comprehensive_score, expected));
        assert!(approx(
            metrics.simple_comprehensive_score,
            (0.75 + 0.95 + 0.75 + 0.75) / 4.0
        ));
        assert!(approx(metrics.max_comprehensive_score, 0.95));
    }

    #[test]
    fn test_skipped_lines_do_not_count() {
        let en = LanguageCode::En;
        let records = vec![record(en, en, 0.9, &[]), skipped(en), record(en, LanguageCode::Fr, 0.7, &[])];
        let metrics = ConfusionAggregator::default().aggregate(&records, en);

        assert_eq!(metrics.total_lines, 2);
        assert_eq!(metrics.skipped_lines, 1);
        assert_eq!(metrics.line_accuracy, 0.5);
        assert!(approx(metrics.language_confidence, 0.8));
    }

    #[test]
    fn test_word_pass_rate_absent_for_latin_languages() {
        let es = LanguageCode::Es;
        let records = vec![record(es, es, 0.9, &[]), record(es, LanguageCode::Fr, 0.9, &[])];
        let metrics = ConfusionAggregator::default().aggregate(&records, es);

        assert_eq!(metrics.word_pass_rate, None);
        let expected = (0.4 * 0.5 + 0.3 * 0.9 + 0.2 * 0.5) / 0.9;
        assert!(approx(metrics.comprehensive_score, expected));
    }

    #[test]
    fn test_undetermined_line_contributes_zero_confidence() {
        let ja = LanguageCode::Ja;
        let mut undetermined = record(ja, ja, 1.0, &[]);
        undetermined.detected = None;
        undetermined.is_correct = false;

        let records = vec![record(ja, ja, 1.0, &[]), undetermined];
        let metrics = ConfusionAggregator::default().aggregate(&records, ja);
        assert_eq!(metrics.language_confidence, 0.5);
        assert_eq!(metrics.lines_with_errors, 1);
    }

    #[test]
    fn test_custom_weights() {
        let zh = LanguageCode::Zh;
        let weights = ScoreWeights {
            line_accuracy: 1.0,
            language_confidence: 0.0,
            line_pass_rate: 0.0,
            word_pass_rate: 0.0,
        };
        let records = vec![record(zh, zh, 0.2, &[]), record(zh, LanguageCode::Ja, 0.2, &[])];
        let metrics = ConfusionAggregator::new(weights).aggregate(&records, zh);
        assert!(approx(metrics.comprehensive_score, 0.5));
    }

    #[test]
    fn test_order_does_not_matter() {
        let ko = LanguageCode::Ko;
        let mut records = vec![
            record(ko, ko, 0.9, &["word"]),
            record(ko, LanguageCode::En, 0.6, &[]),
            record(ko, ko, 0.7, &[]),
        ];
        let forward = ConfusionAggregator::default().aggregate(&records, ko);
        records.reverse();
        let backward = ConfusionAggregator::default().aggregate(&records, ko);
        assert_eq!(forward.total_lines, backward.total_lines);
        assert!(approx(forward.comprehensive_score, backward.comprehensive_score));
        assert!(approx(forward.language_confidence, backward.language_confidence));
    }

    #[test]
    fn test_metrics_serialize_null_word_pass_rate() {
        let metrics = ConfusionAggregator::default().aggregate(&[], LanguageCode::En);
        let json = serde_json::to_value(&metrics).expect("Should serialize");
        assert!(json["word_pass_rate"].is_null());
        assert_eq!(json["total_lines"], 0);
    }

    // ==================== Property Tests ====================

    fn arb_language() -> impl Strategy<Value = LanguageCode> {
        (0..LanguageCode::ALL.len()).prop_map(|i| LanguageCode::ALL[i])
    }

    fn arb_record(expected: LanguageCode) -> impl Strategy<Value = LineRecord> {
        (arb_language(), 0.0f64..=1.0, any::<bool>(), any::<bool>()).prop_map(
            move |(detected, confidence, leaked, is_skipped)| {
                if is_skipped {
                    skipped(expected)
                } else {
                    let words: &[&str] = if leaked { &["leak"] } else { &[] };
                    record(expected, detected, confidence, words)
                }
            },
        )
    }

    fn arb_records() -> impl Strategy<Value = (LanguageCode, Vec<LineRecord>)> {
        arb_language().prop_flat_map(|expected| {
            (Just(expected), prop::collection::vec(arb_record(expected), 0..20))
        })
    }

    proptest! {
        #[test]
        fn prop_rates_stay_in_unit_range((expected, records) in arb_records()) {
            let m = ConfusionAggregator::default().aggregate(&records, expected);
            for value in [
                m.line_accuracy,
                m.line_pass_rate,
                m.language_confidence,
                m.language_confusion_score,
                m.comprehensive_score,
                m.simple_comprehensive_score,
                m.max_comprehensive_score,
            ] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
            if let Some(rate) = m.word_pass_rate {
                prop_assert!((0.0..=1.0).contains(&rate));
            }
        }

        #[test]
        fn prop_confusion_is_complement_of_pass_rate((expected, records) in arb_records()) {
            let m = ConfusionAggregator::default().aggregate(&records, expected);
            prop_assert_eq!(m.language_confusion_score, 1.0 - m.line_pass_rate);
        }

        #[test]
        fn prop_word_pass_rate_only_for_cjk((expected, records) in arb_records()) {
            let m = ConfusionAggregator::default().aggregate(&records, expected);
            if !expected.is_cjk() || m.total_lines == 0 {
                prop_assert!(m.word_pass_rate.is_none());
            } else {
                prop_assert!(m.word_pass_rate.is_some());
            }
        }

        #[test]
        fn prop_adding_correct_line_never_lowers_accuracy(
            (expected, records) in arb_records(),
            confidence in 0.0f64..=1.0,
        ) {
            let aggregator = ConfusionAggregator::default();
            let before = aggregator.aggregate(&records, expected);

            let mut extended = records.clone();
            extended.push(record(expected, expected, confidence, &[]));
            let after = aggregator.aggregate(&extended, expected);

            prop_assert!(after.line_accuracy >= before.line_accuracy);
            prop_assert!(after.line_pass_rate >= before.line_pass_rate);
        }
    }
}
