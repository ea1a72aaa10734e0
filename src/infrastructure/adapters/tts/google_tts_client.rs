//! Google TTS Client - 调用 Google 翻译的语音合成接口
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 TTS API:
//! GET https://translate.google.com/translate_tts?ie=UTF-8&client=tw-ob&tl=ja&q=...&total=N&idx=i&textlen=n
//! Response: audio/mpeg binary
//!
//! 接口对 `q` 的长度有限制，较长的文本会先切成多个小片段逐个请求，
//! 再按顺序拼接返回的 MP3 数据

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
use crate::domain::{segment_text, BreakMode, LanguageCode, SegmentConfig};

/// 单次请求的默认最大字符数
pub const DEFAULT_MAX_REQUEST_CHARS: usize = 100;

/// 切分请求文本时优先使用的断句标点
const REQUEST_TERMINATORS: &[char] = &[
    '。', '、', '，', '！', '？', '；', '：', '.', ',', '!', '?', ';', ':',
];

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 合成接口 URL
    pub base_url: String,
    /// `client` 查询参数
    pub client: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 单次请求 `q` 参数的最大字符数
    pub max_request_chars: usize,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com/translate_tts".to_string(),
            client: "tw-ob".to_string(),
            timeout_secs: 30,
            max_request_chars: DEFAULT_MAX_REQUEST_CHARS,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_max_request_chars(mut self, max_chars: usize) -> Self {
        self.max_request_chars = max_chars;
        self
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    /// 创建新的客户端
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, TtsError> {
        Self::new(GoogleTtsClientConfig::default())
    }

    /// 将文本切分为单次请求可接受的片段
    ///
    /// 先按标点断开，其次在空白处断开，都没有时硬切
    fn request_pieces(&self, text: &str) -> Vec<String> {
        let config = SegmentConfig::with_max_chars(self.config.max_request_chars.max(1))
            .terminators(REQUEST_TERMINATORS.iter().copied())
            .split_ratio(0.0)
            .break_mode(BreakMode::Whitespace);

        match segment_text(text, &config) {
            Ok(pieces) if !pieces.is_empty() => pieces,
            // 只有标点的文本原样发送
            _ => vec![text.trim().to_string()],
        }
    }

    /// 构造第 `idx` 个片段（共 `total` 个）的合成请求
    fn build_request(
        &self,
        text: &str,
        language: &LanguageCode,
        idx: usize,
        total: usize,
    ) -> Result<reqwest::Request, TtsError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let text_len = text.chars().count().to_string();
        self.client
            .get(&self.config.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", self.config.client.as_str()),
                ("tl", language.as_str()),
                ("q", text),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .build()
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to build request: {}", e)))
    }

    /// 发送单个请求，返回音频数据和 Content-Type
    async fn fetch(
        &self,
        http_request: reqwest::Request,
    ) -> Result<(Vec<u8>, Option<String>), TtsError> {
        let response = self.client.execute(http_request).await.map_err(|e| {
            if e.is_timeout() {
                TtsError::Timeout
            } else if e.is_connect() {
                TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
            } else {
                TtsError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio body".to_string()));
        }

        Ok((audio_data, content_type))
    }
}

#[async_trait]
impl TtsEnginePort for GoogleTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let pieces = self.request_pieces(&request.text);
        let total = pieces.len();

        let mut audio_data = Vec::new();
        let mut content_type = None;
        for (idx, piece) in pieces.iter().enumerate() {
            let http_request = self.build_request(piece, &request.language, idx, total)?;

            tracing::debug!(
                url = %self.config.base_url,
                idx,
                total,
                text_len = piece.chars().count(),
                language = %request.language,
                "Sending TTS request"
            );

            let (data, piece_type) = self.fetch(http_request).await?;
            audio_data.extend_from_slice(&data);
            content_type = content_type.or(piece_type);
        }

        tracing::info!(
            content_type = ?content_type,
            requests = total,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            audio_data,
            content_type,
        })
    }
}
