//! Dictionary-based Chinese word segmentation.

use super::Tokenizer;
use jieba_rs::Jieba;

/// Chinese word segmenter backed by `jieba-rs`.
///
/// Loading the bundled dictionary is expensive, so build one segmenter and
/// share it behind an `Arc`. Whitespace and punctuation pieces are dropped.
pub struct JiebaSegmenter {
    jieba: Jieba,
}

impl JiebaSegmenter {
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaSegmenter {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect()
    }
}
