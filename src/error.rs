use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the scoring pipeline.
///
/// Only `UnsupportedLanguage` and `InvalidConfig` reach callers of the scoring
/// API. Missing optional resources (word list, statistical detector) are
/// degraded locally and never turn into an error on the scoring path.
#[derive(Debug, Error)]
pub enum ConfusionError {
    /// The expected language is not one of the nine supported codes
    #[error("Unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    /// A configuration value is out of range or could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The English word list could not be read
    #[error("Failed to read word list at {}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfusionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_message() {
        let err = ConfusionError::UnsupportedLanguage("ru".to_string());
        assert_eq!(err.to_string(), "Unsupported language code: 'ru'");
    }

    #[test]
    fn test_word_list_error_keeps_source() {
        let err = ConfusionError::WordList {
            path: PathBuf::from("/missing/words"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/missing/words"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
