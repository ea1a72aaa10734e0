//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{
    BreakMode, LanguageCode, LanguageError, SegmentConfig, DEFAULT_LANGUAGE_CODE,
    DEFAULT_MAX_CHARS, DEFAULT_SPLIT_RATIO,
};
use crate::infrastructure::adapters::{
    CommandAudioPlayerConfig, GoogleTtsClientConfig, DEFAULT_MAX_REQUEST_CHARS,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 分段配置
    #[serde(default)]
    pub segment: SegmentSettings,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 播放配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 断点字符类型（配置文件取值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakModeSetting {
    #[default]
    AsciiSpace,
    Whitespace,
}

impl From<BreakModeSetting> for BreakMode {
    fn from(setting: BreakModeSetting) -> Self {
        match setting {
            BreakModeSetting::AsciiSpace => BreakMode::AsciiSpace,
            BreakModeSetting::Whitespace => BreakMode::Whitespace,
        }
    }
}

/// 分段配置
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentSettings {
    /// 单个片段最大字符数
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// 句末分隔符，字符串中的每个字符都是一个分隔符
    #[serde(default = "default_terminators")]
    pub terminators: String,

    /// 空格断点阈值
    #[serde(default = "default_split_ratio")]
    pub split_ratio: f64,

    #[serde(default)]
    pub break_mode: BreakModeSetting,
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_terminators() -> String {
    "。".to_string()
}

fn default_split_ratio() -> f64 {
    DEFAULT_SPLIT_RATIO
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            terminators: default_terminators(),
            split_ratio: default_split_ratio(),
            break_mode: BreakModeSetting::default(),
        }
    }
}

impl SegmentSettings {
    /// 转换为分割器配置
    pub fn to_segment_config(&self) -> SegmentConfig {
        SegmentConfig::with_max_chars(self.max_chars)
            .terminators(self.terminators.chars())
            .split_ratio(self.split_ratio)
            .break_mode(self.break_mode.into())
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 合成接口 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// `client` 查询参数
    #[serde(default = "default_tts_client")]
    pub client: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 默认合成语言（语言代码或显示标签）
    #[serde(default = "default_language")]
    pub default_language: String,

    /// 单次请求的最大字符数，更长的片段拆成多次请求
    #[serde(default = "default_max_request_chars")]
    pub max_request_chars: usize,
}

fn default_tts_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_tts_client() -> String {
    "tw-ob".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

fn default_language() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_max_request_chars() -> usize {
    DEFAULT_MAX_REQUEST_CHARS
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            client: default_tts_client(),
            timeout_secs: default_tts_timeout(),
            default_language: default_language(),
            max_request_chars: default_max_request_chars(),
        }
    }
}

impl TtsConfig {
    pub fn client_config(&self) -> GoogleTtsClientConfig {
        GoogleTtsClientConfig::new(&self.url)
            .with_client(&self.client)
            .with_timeout(self.timeout_secs)
            .with_max_request_chars(self.max_request_chars)
    }

    pub fn language(&self) -> Result<LanguageCode, LanguageError> {
        LanguageCode::parse(&self.default_language)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频输出根目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("generated_audio")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

/// 播放配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// 合成后是否自动播放
    #[serde(default = "default_playback_enabled")]
    pub enabled: bool,

    /// 播放器程序
    #[serde(default = "default_player_command")]
    pub command: String,

    /// 放在文件路径之前的播放器参数
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

fn default_playback_enabled() -> bool {
    true
}

fn default_player_command() -> String {
    CommandAudioPlayerConfig::default().program
}

fn default_player_args() -> Vec<String> {
    CommandAudioPlayerConfig::default().args
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            enabled: default_playback_enabled(),
            command: default_player_command(),
            args: default_player_args(),
        }
    }
}

impl PlaybackConfig {
    pub fn player_config(&self) -> CommandAudioPlayerConfig {
        CommandAudioPlayerConfig {
            program: self.command.clone(),
            args: self.args.clone(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
