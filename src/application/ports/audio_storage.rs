//! Audio Storage Port - 出站端口
//!
//! 定义合成音频的落盘抽象：每次朗读对应一个会话目录，目录内为编号音频文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 会话目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDir {
    /// 目录名（文本前缀 + 时间戳）
    pub name: String,
    /// 完整路径
    pub path: PathBuf,
}

impl SessionDir {
    /// 从已有路径构造（用于回放）
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 为一段输入文本创建会话目录
    async fn create_session(&self, text: &str) -> Result<SessionDir, AudioStorageError>;

    /// 获取音频文件路径（`segment_index` 从 0 开始）
    fn audio_path(&self, session: &SessionDir, segment_index: usize) -> PathBuf;

    /// 保存音频数据
    async fn save_audio(
        &self,
        session: &SessionDir,
        segment_index: usize,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError>;

    /// 按文件名顺序列出会话目录内的音频
    async fn list_audio(&self, session: &SessionDir) -> Result<Vec<PathBuf>, AudioStorageError>;
}
