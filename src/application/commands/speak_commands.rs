//! Speak Commands

use std::path::PathBuf;

use crate::domain::{LanguageCode, SegmentConfig};

/// 朗读命令：分段、合成、保存并按顺序播放
#[derive(Debug, Clone)]
pub struct SpeakText {
    pub text: String,
    pub language: LanguageCode,
    /// 为 false 时只生成音频文件
    pub play: bool,
}

/// 回放命令：按顺序播放已保存的会话目录
#[derive(Debug, Clone)]
pub struct PlaySession {
    pub dir: PathBuf,
}

/// 分段命令（只分段，不合成）
#[derive(Debug, Clone)]
pub struct SplitText {
    pub text: String,
    pub config: SegmentConfig,
}
