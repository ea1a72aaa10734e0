//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_player;
mod audio_storage;
mod status_publisher;
mod text_segmenter;
mod tts_engine;

pub use audio_player::{AudioPlayerPort, PlaybackError};
pub use audio_storage::{AudioStorageError, AudioStoragePort, SessionDir};
pub use status_publisher::{StatusEvent, StatusPublisherPort, StatusTone};
pub use text_segmenter::{SegmentedText, TextSegmenterPort};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
