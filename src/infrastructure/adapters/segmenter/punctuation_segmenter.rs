//! Punctuation Segmenter - 基于句末标点的分割器
//!
//! 实现 TextSegmenterPort trait，分割逻辑见 [`crate::domain::segment_text`]

use crate::application::ports::{SegmentedText, TextSegmenterPort};
use crate::domain::{segment_text, SegmentConfig, SegmentError};

/// 基于句末标点的分割器
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl PunctuationSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl TextSegmenterPort for PunctuationSegmenter {
    fn segment(
        &self,
        text: &str,
        config: &SegmentConfig,
    ) -> Result<Vec<SegmentedText>, SegmentError> {
        let segments = segment_text(text, config)?
            .into_iter()
            .enumerate()
            .map(|(index, content)| SegmentedText { index, content })
            .collect();
        Ok(segments)
    }
}
