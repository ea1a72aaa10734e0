//! Status Publisher Port - 进度事件推送抽象
//!
//! 朗读流程的每一步都会发布一个 [`StatusEvent`]，供状态栏或命令行显示

use serde::{Deserialize, Serialize};

/// 状态显示色调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// 处理中
    Busy,
    Success,
    /// 播放中
    Playback,
    Warning,
    Error,
}

/// 进度事件
///
/// `index` 从 0 开始，`message()` 中显示为从 1 开始
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum StatusEvent {
    Segmenting,
    Segmented {
        total: usize,
    },
    Synthesizing {
        index: usize,
        total: usize,
    },
    Synthesized {
        count: usize,
        dir: String,
    },
    Playing {
        index: usize,
        total: usize,
        file_name: String,
    },
    Completed {
        dir: String,
    },
    /// 输入为空
    NoInput,
    /// 分割后没有可合成的内容
    NothingToSynthesize,
    Failed {
        error: String,
    },
}

impl StatusEvent {
    /// 状态栏文本
    pub fn message(&self) -> String {
        match self {
            StatusEvent::Segmenting => "テキストを分割中...".to_string(),
            StatusEvent::Segmented { total } => {
                format!("テキストを {} 個のセグメントに分割しました。", total)
            }
            StatusEvent::Synthesizing { index, total } => {
                format!("音声ファイル {}/{} を作成中...", index + 1, total)
            }
            StatusEvent::Synthesized { count, .. } => {
                format!("{} 個の音声ファイルを作成しました。", count)
            }
            StatusEvent::Playing {
                index,
                total,
                file_name,
            } => format!("再生中: {}/{} - '{}'", index + 1, total, file_name),
            StatusEvent::Completed { dir } => {
                format!("すべての音声ファイルの再生が完了しました。フォルダ: '{}'", dir)
            }
            StatusEvent::NoInput => "テキストが入力されていません".to_string(),
            StatusEvent::NothingToSynthesize => "分割可能なテキストが見つかりません".to_string(),
            StatusEvent::Failed { error } => format!("エラー: {}", error),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            StatusEvent::Segmenting | StatusEvent::Synthesizing { .. } => StatusTone::Busy,
            StatusEvent::Segmented { .. }
            | StatusEvent::Synthesized { .. }
            | StatusEvent::Completed { .. } => StatusTone::Success,
            StatusEvent::Playing { .. } => StatusTone::Playback,
            StatusEvent::NoInput | StatusEvent::NothingToSynthesize => StatusTone::Warning,
            StatusEvent::Failed { .. } => StatusTone::Error,
        }
    }
}

/// Status Publisher Port
pub trait StatusPublisherPort: Send + Sync {
    fn publish(&self, event: StatusEvent);
}
