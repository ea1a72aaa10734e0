//! LongTalker - 长文本朗读工具
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 文本分割器: 按句末标点合并、按上限强制切分
//! - 合成语言
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextSegmenter, TtsEngine, AudioStorage, AudioPlayer, StatusPublisher）
//! - Commands: 朗读、回放、分段命令及处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 分割器, Google TTS 客户端, 文件存储, 外部播放器
//! - Events: 状态事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use domain::{segment, segment_text, SegmentConfig, SegmentError};
