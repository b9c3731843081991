use crate::error::{ConfusionError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Weights of the four components of the comprehensive score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub line_accuracy: f64,
    pub language_confidence: f64,
    pub line_pass_rate: f64,
    pub word_pass_rate: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            line_accuracy: 0.4,
            language_confidence: 0.3,
            line_pass_rate: 0.2,
            word_pass_rate: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    // Line filtering
    pub minimum_token_threshold: usize,

    /// Segment Chinese into words instead of characters (needs the `jieba` feature)
    pub chinese_segmentation: bool,

    // Fusion
    pub statistical_acceptance_threshold: f64,
    pub character_dominance_threshold: f64,
    pub character_agreement_tolerance: f64,
    pub statistical_detection: bool,

    // Composite scores
    pub weights: ScoreWeights,

    // English word list
    pub words_file: PathBuf,
    pub min_english_word_length: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            minimum_token_threshold: 3,
            chinese_segmentation: false,
            statistical_acceptance_threshold: 0.5,
            character_dominance_threshold: 0.6,
            character_agreement_tolerance: 0.1,
            statistical_detection: true,
            weights: ScoreWeights::default(),
            words_file: PathBuf::from("words"),
            min_english_word_length: 3,
        }
    }
}

impl ScoringConfig {
    /// Build a configuration from `LC_*` environment variables.
    ///
    /// Unset variables fall back to the defaults. A variable that is set but
    /// cannot be parsed is an error rather than being silently ignored.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            minimum_token_threshold: env_or("LC_MIN_TOKENS", defaults.minimum_token_threshold)?,
            chinese_segmentation: env_or("LC_CHINESE_SEGMENTATION", defaults.chinese_segmentation)?,
            statistical_acceptance_threshold: env_or(
                "LC_STATISTICAL_THRESHOLD",
                defaults.statistical_acceptance_threshold,
            )?,
            character_dominance_threshold: env_or(
                "LC_DOMINANCE_THRESHOLD",
                defaults.character_dominance_threshold,
            )?,
            character_agreement_tolerance: env_or(
                "LC_AGREEMENT_TOLERANCE",
                defaults.character_agreement_tolerance,
            )?,
            statistical_detection: env_or("LC_STATISTICAL_DETECTION", defaults.statistical_detection)?,
            weights: ScoreWeights {
                line_accuracy: env_or("LC_WEIGHT_LINE_ACCURACY", defaults.weights.line_accuracy)?,
                language_confidence: env_or(
                    "LC_WEIGHT_LANGUAGE_CONFIDENCE",
                    defaults.weights.language_confidence,
                )?,
                line_pass_rate: env_or("LC_WEIGHT_LINE_PASS_RATE", defaults.weights.line_pass_rate)?,
                word_pass_rate: env_or("LC_WEIGHT_WORD_PASS_RATE", defaults.weights.word_pass_rate)?,
            },
            words_file: std::env::var("LC_WORDS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.words_file),
            min_english_word_length: env_or(
                "LC_MIN_WORD_LENGTH",
                defaults.min_english_word_length,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is within its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_token_threshold == 0 {
            return Err(ConfusionError::InvalidConfig(
                "minimum_token_threshold must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("statistical_acceptance_threshold", self.statistical_acceptance_threshold),
            ("character_dominance_threshold", self.character_dominance_threshold),
            ("character_agreement_tolerance", self.character_agreement_tolerance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfusionError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let weights = [
            self.weights.line_accuracy,
            self.weights.language_confidence,
            self.weights.line_pass_rate,
            self.weights.word_pass_rate,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfusionError::InvalidConfig(format!(
                "score weights must be finite and non-negative, got {:?}",
                self.weights
            )));
        }
        // Dropping word_pass_rate must still leave something to normalize by
        if weights[..3].iter().sum::<f64>() <= 0.0 {
            return Err(ConfusionError::InvalidConfig(
                "line_accuracy, language_confidence and line_pass_rate weights must not all be zero"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ConfusionError::InvalidConfig(format!("{} has an invalid value: '{}'", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LC_MIN_TOKENS",
        "LC_CHINESE_SEGMENTATION",
        "LC_STATISTICAL_THRESHOLD",
        "LC_DOMINANCE_THRESHOLD",
        "LC_AGREEMENT_TOLERANCE",
        "LC_STATISTICAL_DETECTION",
        "LC_WEIGHT_LINE_ACCURACY",
        "LC_WEIGHT_LANGUAGE_CONFIDENCE",
        "LC_WEIGHT_LINE_PASS_RATE",
        "LC_WEIGHT_WORD_PASS_RATE",
        "LC_WORDS_FILE",
        "LC_MIN_WORD_LENGTH",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.minimum_token_threshold, 3);
        assert_eq!(config.statistical_acceptance_threshold, 0.5);
        assert_eq!(config.character_dominance_threshold, 0.6);
        assert_eq!(config.weights, ScoreWeights::default());
        assert!(config.statistical_detection);
        assert!(!config.chinese_segmentation);
        assert!(config.validate().is_ok());
    }

    // ==================== Environment Tests ====================

    #[test]
    #[serial]
    fn test_from_env_uses_defaults_when_unset() {
        clear_env();
        let config = ScoringConfig::from_env().expect("Should load");
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("LC_MIN_TOKENS", "5");
        std::env::set_var("LC_STATISTICAL_THRESHOLD", "0.3");
        std::env::set_var("LC_STATISTICAL_DETECTION", "false");
        std::env::set_var("LC_CHINESE_SEGMENTATION", "true");
        std::env::set_var("LC_WEIGHT_WORD_PASS_RATE", "0.25");
        std::env::set_var("LC_WORDS_FILE", "/usr/share/dict/words");

        let config = ScoringConfig::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.minimum_token_threshold, 5);
        assert_eq!(config.statistical_acceptance_threshold, 0.3);
        assert!(!config.statistical_detection);
        assert!(config.chinese_segmentation);
        assert_eq!(config.weights.word_pass_rate, 0.25);
        assert_eq!(config.words_file, PathBuf::from("/usr/share/dict/words"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_value() {
        clear_env();
        std::env::set_var("LC_MIN_TOKENS", "three");
        let result = ScoringConfig::from_env();
        clear_env();

        let err = result.expect_err("Should reject");
        assert!(err.to_string().contains("LC_MIN_TOKENS"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_out_of_range_value() {
        clear_env();
        std::env::set_var("LC_DOMINANCE_THRESHOLD", "1.5");
        let result = ScoringConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfusionError::InvalidConfig(_))));
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_rejects_zero_token_threshold() {
        let config = ScoringConfig {
            minimum_token_threshold: 0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                line_accuracy: -0.1,
                ..ScoreWeights::default()
            },
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_all_zero_line_weights() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                line_accuracy: 0.0,
                language_confidence: 0.0,
                line_pass_rate: 0.0,
                word_pass_rate: 1.0,
            },
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
