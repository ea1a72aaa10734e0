//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::LanguageCode;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TtsError {
    /// 网络抖动和超时可以由调用方重试，其余视为致命错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, TtsError::NetworkError(_) | TtsError::Timeout)
    }
}

/// 语音合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 合成语言
    pub language: LanguageCode,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 编码后的音频数据（MP3）
    pub audio_data: Vec<u8>,
    /// 响应的 Content-Type
    pub content_type: Option<String>,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口: (文本, 语言) -> 音频字节
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;
}
