//! Text Segmenter Port - 文本分割抽象
//!
//! 定义文本分割的抽象接口，具体实现在 infrastructure/adapters 层

use crate::domain::{SegmentConfig, SegmentError};

/// 分割后的文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedText {
    /// 从 0 开始的片段序号
    pub index: usize,
    pub content: String,
}

impl SegmentedText {
    /// 片段字符数
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Text Segmenter Port
///
/// 文本分割器接口
pub trait TextSegmenterPort: Send + Sync {
    /// 将文本分割成片段
    fn segment(
        &self,
        text: &str,
        config: &SegmentConfig,
    ) -> Result<Vec<SegmentedText>, SegmentError>;
}
