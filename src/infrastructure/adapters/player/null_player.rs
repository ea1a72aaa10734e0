//! Null Player - 不播放，只记录日志

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 空播放器
///
/// 用于禁用播放或测试，记录"播放过"的文件
#[derive(Default)]
pub struct NullAudioPlayer {
    played: Mutex<Vec<PathBuf>>,
}

impl NullAudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序返回已播放的文件
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AudioPlayerPort for NullAudioPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        tracing::debug!(path = %path.display(), "NullAudioPlayer: skipping playback");
        if let Ok(mut played) = self.played.lock() {
            played.push(path.to_path_buf());
        }
        Ok(())
    }
}
