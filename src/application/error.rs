//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{AudioStorageError, PlaybackError, TtsError};
use crate::domain::{LanguageError, SegmentError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入为空
    #[error("No text was entered")]
    EmptyInput,

    /// 分割后没有可合成的片段（正常结果，不是故障）
    #[error("No text could be segmented for synthesis")]
    NothingToSynthesize,

    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentError),

    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    /// 外部服务错误
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] TtsError),

    /// 存储错误
    #[error("Storage error: {0}")]
    Storage(#[from] AudioStorageError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl ApplicationError {
    /// 是否属于"没有内容"而非故障
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::NothingToSynthesize)
    }

    /// 调用方是否可以重试
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Synthesis(err) => err.is_retryable(),
            _ => false,
        }
    }
}
