//! Command Player - 调用外部播放器命令
//!
//! 对每个文件执行 `{program} {args...} {file}` 并等待其退出

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 外部播放器配置
#[derive(Debug, Clone)]
pub struct CommandAudioPlayerConfig {
    /// 播放器程序
    pub program: String,
    /// 放在文件路径之前的参数
    pub args: Vec<String>,
}

impl Default for CommandAudioPlayerConfig {
    fn default() -> Self {
        Self {
            program: "ffplay".to_string(),
            args: ["-autoexit", "-nodisp", "-loglevel", "error"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// 外部命令播放器
pub struct CommandAudioPlayer {
    config: CommandAudioPlayerConfig,
}

impl CommandAudioPlayer {
    pub fn new(config: CommandAudioPlayerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AudioPlayerPort for CommandAudioPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::FileNotFound(path.display().to_string()));
        }

        tracing::debug!(
            program = %self.config.program,
            path = %path.display(),
            "Starting playback"
        );

        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(path)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| PlaybackError::LaunchFailed {
                program: self.config.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(PlaybackError::PlayerFailed(status.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn player(program: &str) -> CommandAudioPlayer {
        CommandAudioPlayer::new(CommandAudioPlayerConfig {
            program: program.to_string(),
            args: Vec::new(),
        })
    }

    #[test]
    fn test_default_uses_ffplay() {
        let config = CommandAudioPlayerConfig::default();
        assert_eq!(config.program, "ffplay");
        assert!(config.args.contains(&"-autoexit".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let result = player("true").play(Path::new("/nonexistent/001.mp3")).await;
        assert!(matches!(result, Err(PlaybackError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_program_reported() {
        let file = NamedTempFile::new().unwrap();
        let result = player("longtalker-no-such-player").play(file.path()).await;
        assert!(matches!(result, Err(PlaybackError::LaunchFailed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_checked() {
        let file = NamedTempFile::new().unwrap();
        assert!(player("true").play(file.path()).await.is_ok());
        assert!(matches!(
            player("false").play(file.path()).await,
            Err(PlaybackError::PlayerFailed(_))
        ));
    }
}
