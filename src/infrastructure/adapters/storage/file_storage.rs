//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait
//!
//! 目录结构:
//! {base_dir}/{文本前缀}_{YYYYmmdd_HHMMSS}/001.mp3, 002.mp3, ...

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorageError, AudioStoragePort, SessionDir};

/// 目录名取输入文本的前 N 个字符
const SESSION_PREFIX_CHARS: usize = 20;

/// 音频文件扩展名
const AUDIO_EXTENSION: &str = "mp3";

/// 目录名中需要替换为 `_` 的字符
#[inline]
fn is_unsafe_path_char(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\u{3000}' | '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'
    ) || ch.is_control()
}

/// 由输入文本和时间生成会话目录名
pub fn session_dir_name<Tz>(text: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let prefix: String = text
        .chars()
        .take(SESSION_PREFIX_CHARS)
        .map(|ch| if is_unsafe_path_char(ch) { '_' } else { ch })
        .collect();
    format!("{}_{}", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// 音频文件名（`segment_index` 从 0 开始，文件名从 001 开始）
pub fn audio_file_name(segment_index: usize) -> String {
    format!("{:03}.{}", segment_index + 1, AUDIO_EXTENSION)
}

fn audio_file_number(path: &Path) -> Option<usize> {
    path.file_stem()?.to_str()?.parse().ok()
}

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    async fn create_session(&self, text: &str) -> Result<SessionDir, AudioStorageError> {
        let name = session_dir_name(text.trim(), &Local::now());
        let path = self.base_dir.join(&name);

        fs::create_dir_all(&path)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::info!(path = %path.display(), "Session directory created");

        Ok(SessionDir { name, path })
    }

    fn audio_path(&self, session: &SessionDir, segment_index: usize) -> PathBuf {
        session.path.join(audio_file_name(segment_index))
    }

    async fn save_audio(
        &self,
        session: &SessionDir,
        segment_index: usize,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError> {
        let audio_path = self.audio_path(session, segment_index);

        fs::write(&audio_path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved audio: session={}, segment={}, size={} bytes",
            session.name,
            segment_index,
            data.len()
        );

        Ok(audio_path)
    }

    async fn list_audio(&self, session: &SessionDir) -> Result<Vec<PathBuf>, AudioStorageError> {
        if !session.path.is_dir() {
            return Err(AudioStorageError::DirectoryNotFound(
                session.path.to_string_lossy().to_string(),
            ));
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(&session.path)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == AUDIO_EXTENSION) {
                files.push(path);
            }
        }

        // 按编号排序，保证 1000.mp3 排在 999.mp3 之后
        files.sort_by(|a, b| {
            audio_file_number(a)
                .cmp(&audio_file_number(b))
                .then_with(|| a.cmp(b))
        });
        Ok(files)
    }
}
