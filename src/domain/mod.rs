//! Domain Layer - 领域层
//!
//! 纯函数与值对象，不依赖任何 I/O:
//! - 文本分割器
//! - 合成语言

mod language;
mod text_segmenter;

pub use language::{
    find_language, Language, LanguageCode, LanguageError, DEFAULT_LANGUAGE_CODE,
    SUPPORTED_LANGUAGES,
};
pub use text_segmenter::{
    segment, segment_text, BreakMode, SegmentConfig, SegmentError, DEFAULT_MAX_CHARS,
    DEFAULT_SPLIT_RATIO, DEFAULT_TERMINATORS,
};
