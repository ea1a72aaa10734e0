//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextSegmenter、TtsEngine、AudioStorage、AudioPlayer、StatusPublisher）
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{PlaySessionHandler, SpeakResponse, SpeakTextHandler, SplitTextHandler},
    PlaySession, SpeakText, SplitText,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio player
    AudioPlayerPort,
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    PlaybackError,
    // Text segmenter
    SegmentedText,
    SessionDir,
    // Status publisher
    StatusEvent,
    StatusPublisherPort,
    StatusTone,
    // TTS engine
    SynthesisRequest,
    SynthesisResponse,
    TextSegmenterPort,
    TtsEnginePort,
    TtsError,
};
