//! Storage Adapter - 音频文件存储实现

mod file_storage;

pub use file_storage::{audio_file_name, session_dir_name, FileAudioStorage};
