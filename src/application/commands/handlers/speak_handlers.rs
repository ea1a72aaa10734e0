//! Speak Command Handlers
//!
//! 朗读流程：分段 -> 逐段合成并保存 -> 按顺序播放

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::{PlaySession, SpeakText};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioPlayerPort, AudioStoragePort, SegmentedText, SessionDir, StatusEvent,
    StatusPublisherPort, SynthesisRequest, TextSegmenterPort, TtsEnginePort,
};
use crate::domain::SegmentConfig;

// ============================================================================
// SpeakText
// ============================================================================

/// 朗读响应
#[derive(Debug, Clone)]
pub struct SpeakResponse {
    pub session: SessionDir,
    pub segments: Vec<SegmentedText>,
    /// 与 `segments` 一一对应的音频文件
    pub files: Vec<PathBuf>,
    pub played: bool,
}

/// SpeakText Handler
pub struct SpeakTextHandler {
    segmenter: Arc<dyn TextSegmenterPort>,
    segment_config: SegmentConfig,
    tts_engine: Arc<dyn TtsEnginePort>,
    storage: Arc<dyn AudioStoragePort>,
    player: Arc<dyn AudioPlayerPort>,
    publisher: Arc<dyn StatusPublisherPort>,
}

impl SpeakTextHandler {
    pub fn new(
        segmenter: Arc<dyn TextSegmenterPort>,
        segment_config: SegmentConfig,
        tts_engine: Arc<dyn TtsEnginePort>,
        storage: Arc<dyn AudioStoragePort>,
        player: Arc<dyn AudioPlayerPort>,
        publisher: Arc<dyn StatusPublisherPort>,
    ) -> Self {
        Self {
            segmenter,
            segment_config,
            tts_engine,
            storage,
            player,
            publisher,
        }
    }

    /// 执行朗读
    ///
    /// 失败和"没有内容"都会先发布对应的状态事件再返回错误
    pub async fn handle(&self, command: SpeakText) -> Result<SpeakResponse, ApplicationError> {
        let result = self.run(command).await;
        if let Err(e) = &result {
            publish_error(self.publisher.as_ref(), e);
        }
        result
    }

    async fn run(&self, command: SpeakText) -> Result<SpeakResponse, ApplicationError> {
        let text = command.text.trim();
        if text.is_empty() {
            return Err(ApplicationError::EmptyInput);
        }

        self.publisher.publish(StatusEvent::Segmenting);
        let segments = self.segmenter.segment(text, &self.segment_config)?;
        if segments.is_empty() {
            return Err(ApplicationError::NothingToSynthesize);
        }

        let total = segments.len();
        self.publisher.publish(StatusEvent::Segmented { total });
        tracing::info!(
            total_segments = total,
            language = %command.language,
            "Text segmented"
        );

        let session = self.storage.create_session(text).await?;

        let mut files = Vec::with_capacity(total);
        for segment in &segments {
            self.publisher.publish(StatusEvent::Synthesizing {
                index: segment.index,
                total,
            });

            let response = self
                .tts_engine
                .synthesize(SynthesisRequest {
                    text: segment.content.clone(),
                    language: command.language.clone(),
                })
                .await?;

            let path = self
                .storage
                .save_audio(&session, segment.index, &response.audio_data)
                .await?;

            tracing::debug!(
                segment_index = segment.index,
                char_count = segment.char_count(),
                audio_size = response.audio_data.len(),
                path = %path.display(),
                "Segment synthesized"
            );
            files.push(path);
        }

        self.publisher.publish(StatusEvent::Synthesized {
            count: files.len(),
            dir: session.path.display().to_string(),
        });

        if command.play {
            play_in_order(self.player.as_ref(), self.publisher.as_ref(), &files).await?;
            self.publisher.publish(StatusEvent::Completed {
                dir: session.path.display().to_string(),
            });
        }

        tracing::info!(
            session = %session.name,
            files = files.len(),
            played = command.play,
            "Speak command completed"
        );

        Ok(SpeakResponse {
            session,
            segments,
            files,
            played: command.play,
        })
    }
}

// ============================================================================
// PlaySession
// ============================================================================

/// PlaySession Handler - 回放已保存的会话目录
pub struct PlaySessionHandler {
    storage: Arc<dyn AudioStoragePort>,
    player: Arc<dyn AudioPlayerPort>,
    publisher: Arc<dyn StatusPublisherPort>,
}

impl PlaySessionHandler {
    pub fn new(
        storage: Arc<dyn AudioStoragePort>,
        player: Arc<dyn AudioPlayerPort>,
        publisher: Arc<dyn StatusPublisherPort>,
    ) -> Self {
        Self {
            storage,
            player,
            publisher,
        }
    }

    /// 返回播放的文件列表
    pub async fn handle(&self, command: PlaySession) -> Result<Vec<PathBuf>, ApplicationError> {
        let result = self.run(command).await;
        if let Err(e) = &result {
            publish_error(self.publisher.as_ref(), e);
        }
        result
    }

    async fn run(&self, command: PlaySession) -> Result<Vec<PathBuf>, ApplicationError> {
        let session = SessionDir::from_path(&command.dir);
        let files = self.storage.list_audio(&session).await?;
        if files.is_empty() {
            return Err(ApplicationError::NothingToSynthesize);
        }

        play_in_order(self.player.as_ref(), self.publisher.as_ref(), &files).await?;
        self.publisher.publish(StatusEvent::Completed {
            dir: session.path.display().to_string(),
        });

        Ok(files)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// 按顺序播放，每个文件播放结束后才开始下一个
async fn play_in_order(
    player: &dyn AudioPlayerPort,
    publisher: &dyn StatusPublisherPort,
    files: &[PathBuf],
) -> Result<(), ApplicationError> {
    let total = files.len();
    for (index, path) in files.iter().enumerate() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        publisher.publish(StatusEvent::Playing {
            index,
            total,
            file_name,
        });
        player.play(path).await?;
    }
    Ok(())
}

fn publish_error(publisher: &dyn StatusPublisherPort, error: &ApplicationError) {
    match error {
        ApplicationError::EmptyInput => publisher.publish(StatusEvent::NoInput),
        ApplicationError::NothingToSynthesize => {
            publisher.publish(StatusEvent::NothingToSynthesize)
        }
        e => {
            tracing::error!(error = %e, retryable = e.is_retryable(), "Command failed");
            publisher.publish(StatusEvent::Failed {
                error: e.to_string(),
            });
        }
    }
}
