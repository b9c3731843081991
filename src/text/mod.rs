//! Text preparation: response normalization and tokenization.

mod normalize;
#[cfg(feature = "jieba")]
mod segmenter;
mod tokenizer;

pub use normalize::{normalize, split_lines};
#[cfg(feature = "jieba")]
pub use segmenter::JiebaSegmenter;
pub use tokenizer::{CharacterTokenizer, Tokenizer, TokenizerSet, WordTokenizer};
