//! Split Command Handler

use std::sync::Arc;

use crate::application::commands::SplitText;
use crate::application::error::ApplicationError;
use crate::application::ports::{SegmentedText, TextSegmenterPort};

/// SplitText Handler - 只分段，不合成
///
/// 空结果原样返回，由调用方决定如何提示
pub struct SplitTextHandler {
    segmenter: Arc<dyn TextSegmenterPort>,
}

impl SplitTextHandler {
    pub fn new(segmenter: Arc<dyn TextSegmenterPort>) -> Self {
        Self { segmenter }
    }

    pub fn handle(&self, command: SplitText) -> Result<Vec<SegmentedText>, ApplicationError> {
        let segments = self.segmenter.segment(&command.text, &command.config)?;
        tracing::debug!(
            total_segments = segments.len(),
            max_chars = command.config.max_chars,
            "Text split"
        );
        Ok(segments)
    }
}
