//! Segmenter Adapter - 文本分割器实现

mod punctuation_segmenter;

pub use punctuation_segmenter::PunctuationSegmenter;
