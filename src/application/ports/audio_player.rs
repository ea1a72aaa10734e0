//! Audio Player Port - 音频播放抽象

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to launch player `{program}`: {message}")]
    LaunchFailed { program: String, message: String },

    #[error("Player exited with failure status: {0}")]
    PlayerFailed(String),

    #[error("Audio file not found: {0}")]
    FileNotFound(String),
}

/// Audio Player Port
///
/// 播放单个音频文件，返回时播放已结束
#[async_trait]
pub trait AudioPlayerPort: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}
