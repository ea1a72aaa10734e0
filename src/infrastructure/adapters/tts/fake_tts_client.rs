//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 模拟合成延迟
    pub latency: Duration,
    /// 第 N 次调用（从 0 开始）返回服务错误
    pub fail_on_call: Option<usize>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"ID3\x04\x00fake-mp3".to_vec(),
            latency: Duration::ZERO,
            fail_on_call: None,
        }
    }
}

/// Fake TTS Client
///
/// 记录收到的所有请求，便于断言调用顺序
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio_data.len(),
            fail_on_call = ?config.fail_on_call,
            "FakeTtsClient initialized"
        );
        Self {
            config,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 已收到的请求（按调用顺序）
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            call,
            text_len = request.text.chars().count(),
            language = %request.language,
            "FakeTtsClient: returning fixed audio"
        );

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if self.config.fail_on_call == Some(call) {
            return Err(TtsError::ServiceError(format!(
                "HTTP 500 Internal Server Error: fake failure on call {}",
                call
            )));
        }

        Ok(SynthesisResponse {
            audio_data: self.config.audio_data.clone(),
            content_type: Some("audio/mpeg".to_string()),
        })
    }
}
