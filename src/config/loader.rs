//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（longtalker.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["longtalker", "longtalker.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `LONGTALKER_`，层级分隔符 `__`）
/// 2. 配置文件（longtalker.toml 或 longtalker.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `LONGTALKER_SEGMENT__MAX_CHARS=200`
/// - `LONGTALKER_TTS__DEFAULT_LANGUAGE=en`
/// - `LONGTALKER_STORAGE__AUDIO_DIR=/tmp/audio`
/// - `LONGTALKER_PLAYBACK__ENABLED=false`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("segment.max_chars", 300)?
        .set_default("segment.terminators", "。")?
        .set_default("segment.split_ratio", 0.8)?
        .set_default("segment.break_mode", "ascii_space")?
        .set_default("tts.url", "https://translate.google.com/translate_tts")?
        .set_default("tts.client", "tw-ob")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.default_language", "ja")?
        .set_default("tts.max_request_chars", 100)?
        .set_default("storage.audio_dir", "generated_audio")?
        .set_default("playback.enabled", true)?
        .set_default("playback.command", "ffplay")?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: LONGTALKER_SEGMENT__MAX_CHARS=200
    builder = builder.add_source(
        Environment::with_prefix("LONGTALKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .segment
        .to_segment_config()
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if config.tts.max_request_chars == 0 {
        return Err(ConfigError::ValidationError(
            "TTS max_request_chars cannot be 0".to_string(),
        ));
    }

    config
        .tts
        .language()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.playback.enabled && config.playback.command.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Player command cannot be empty when playback is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Segment Max Chars: {}", config.segment.max_chars);
    tracing::info!("Segment Terminators: {:?}", config.segment.terminators);
    tracing::info!("Segment Split Ratio: {}", config.segment.split_ratio);
    tracing::info!("Segment Break Mode: {:?}", config.segment.break_mode);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("TTS Max Request Chars: {}", config.tts.max_request_chars);
    tracing::info!("Default Language: {}", config.tts.default_language);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Playback Enabled: {}", config.playback.enabled);
    if config.playback.enabled {
        tracing::info!(
            "Player: {} {}",
            config.playback.command,
            config.playback.args.join(" ")
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
