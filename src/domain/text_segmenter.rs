//! 文本分割器
//!
//! 将任意长度的文本切分为适合逐段语音合成的片段：
//! 1. 按句末分隔符切句，并在不超过上限的前提下合并相邻句子
//! 2. 对仍然超长的单句强制切分，优先在空格处断开

use thiserror::Error;

/// 默认单个片段的最大字符数
pub const DEFAULT_MAX_CHARS: usize = 300;

/// 默认句末分隔符
pub const DEFAULT_TERMINATORS: &[char] = &['。'];

/// 默认空格断点阈值（相对于上限的比例）
/// 空格位置低于该比例时，直接在上限处硬切
pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;

/// 分割错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("Segment limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    #[error("Split ratio must be within [0, 1], got {0}")]
    InvalidSplitRatio(f64),
}

/// 强制切分时可作为断点的字符
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BreakMode {
    /// 仅 ASCII 空格
    #[default]
    AsciiSpace,
    /// 任意 Unicode 空白字符
    Whitespace,
}

impl BreakMode {
    #[inline]
    fn is_break(self, ch: char) -> bool {
        match self {
            BreakMode::AsciiSpace => ch == ' ',
            BreakMode::Whitespace => ch.is_whitespace(),
        }
    }
}

/// 文本分割配置
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentConfig {
    /// 单个片段的最大字符数
    pub max_chars: usize,
    /// 句末分隔符（保留在前一句末尾）
    pub terminators: Vec<char>,
    /// 空格断点阈值
    pub split_ratio: f64,
    /// 断点字符类型
    pub break_mode: BreakMode,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            terminators: DEFAULT_TERMINATORS.to_vec(),
            split_ratio: DEFAULT_SPLIT_RATIO,
            break_mode: BreakMode::default(),
        }
    }
}

impl SegmentConfig {
    /// 使用指定上限，其余保持默认
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Default::default()
        }
    }

    pub fn terminators(mut self, terminators: impl IntoIterator<Item = char>) -> Self {
        self.terminators = terminators.into_iter().collect();
        self
    }

    pub fn split_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
        self
    }

    pub fn break_mode(mut self, mode: BreakMode) -> Self {
        self.break_mode = mode;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.max_chars == 0 {
            return Err(SegmentError::InvalidLimit(self.max_chars));
        }
        if !(0.0..=1.0).contains(&self.split_ratio) {
            return Err(SegmentError::InvalidSplitRatio(self.split_ratio));
        }
        Ok(())
    }
}

/// 按句末分隔符切句
///
/// 分隔符附在前一句末尾；句子主体先去除首尾空白，主体为空的句子被丢弃
fn split_sentences(text: &str, terminators: &[char]) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if terminators.contains(&ch) {
            let body = current.trim();
            if !body.is_empty() {
                let mut sentence = String::with_capacity(body.len() + ch.len_utf8());
                sentence.push_str(body);
                sentence.push(ch);
                sentences.push(sentence);
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

/// 在不超过上限的前提下合并相邻句子
///
/// 只合并不拆分：单句超长时原样成为一个块，交给 [`enforce_limit`] 处理
fn coalesce_sentences(sentences: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    for sentence in sentences {
        let sentence_chars = sentence.chars().count();
        if buffer_chars + sentence_chars <= max_chars {
            buffer.push_str(&sentence);
            buffer_chars += sentence_chars;
        } else {
            if !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
            }
            buffer = sentence;
            buffer_chars = sentence_chars;
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// 计算强制切分点（字节偏移）
///
/// `text` 的字符数必须大于 `config.max_chars`
fn find_cut(text: &str, config: &SegmentConfig) -> usize {
    let limit = config.max_chars;
    let hard_cut = text
        .char_indices()
        .nth(limit)
        .map_or(text.len(), |(offset, _)| offset);

    // 容忍浮点误差，使恰好落在阈值上的空格也能命中
    let threshold = limit as f64 * config.split_ratio - 1e-9;
    let last_break = text[..hard_cut]
        .char_indices()
        .enumerate()
        .filter(|(_, (_, ch))| config.break_mode.is_break(*ch))
        .last();

    match last_break {
        Some((position, (offset, _))) if position > 0 && position as f64 >= threshold => offset,
        _ => hard_cut,
    }
}

/// 字符数是否超过 `limit`（只扫描前 `limit + 1` 个字符）
#[inline]
fn exceeds(text: &str, limit: usize) -> bool {
    text.char_indices().nth(limit).is_some()
}

/// 对单个块执行上限约束，结果追加到 `out`
///
/// 每次切分只扫描剩余文本的前 `max_chars` 个字符，总耗时与块长度成线性
fn enforce_limit(chunk: &str, config: &SegmentConfig, out: &mut Vec<String>) {
    let mut rest = chunk.trim();

    while exceeds(rest, config.max_chars) {
        let cut = find_cut(rest, config);
        let head = rest[..cut].trim();
        if !head.is_empty() {
            out.push(head.to_string());
        }
        rest = rest[cut..].trim();
    }

    if !rest.is_empty() {
        out.push(rest.to_string());
    }
}

/// 对文本进行分段
///
/// 返回的每个片段都非空、已去除首尾空白，且字符数不超过 `config.max_chars`。
/// 空文本或纯空白文本返回空列表。
pub fn segment_text(text: &str, config: &SegmentConfig) -> Result<Vec<String>, SegmentError> {
    config.validate()?;

    let sentences = split_sentences(text, &config.terminators);
    let chunks = coalesce_sentences(sentences, config.max_chars);

    let mut segments = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        enforce_limit(chunk, config, &mut segments);
    }

    Ok(segments)
}

/// 使用指定上限和默认配置分段（便捷方法）
pub fn segment(text: &str, limit: usize) -> Result<Vec<String>, SegmentError> {
    segment_text(text, &SegmentConfig::with_max_chars(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(segment("", 300).unwrap().is_empty());
        assert!(segment("   ", 300).unwrap().is_empty());
        assert!(segment(" \n\t　", 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(segment("テスト", 0), Err(SegmentError::InvalidLimit(0)));
        assert_eq!(segment("", 0), Err(SegmentError::InvalidLimit(0)));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let config = SegmentConfig::default().split_ratio(1.5);
        assert!(matches!(
            segment_text("abc", &config),
            Err(SegmentError::InvalidSplitRatio(_))
        ));

        let config = SegmentConfig::default().split_ratio(f64::NAN);
        assert!(segment_text("abc", &config).is_err());
    }

    #[test]
    fn test_sentences_merged_up_to_limit() {
        // 各 7 字和 9 字，合计 16 字
        let text = "これは文です。これは別の文です。";
        let segments = segment(text, 20).unwrap();
        assert_eq!(segments, vec!["これは文です。これは別の文です。"]);
    }

    #[test]
    fn test_sentences_flushed_when_limit_exceeded() {
        let text = "これは文です。これは別の文です。";
        let segments = segment(text, 10).unwrap();
        assert_eq!(segments, vec!["これは文です。", "これは別の文です。"]);
        assert!(segments.iter().all(|s| char_len(s) <= 10));
    }

    #[test]
    fn test_terminator_stays_with_preceding_sentence() {
        let segments = segment("一。二。三", 2).unwrap();
        assert_eq!(segments, vec!["一。", "二。", "三"]);
    }

    #[test]
    fn test_sentence_bodies_trimmed_before_merge() {
        let segments = segment("  前の文。  後の文。  ", 300).unwrap();
        assert_eq!(segments, vec!["前の文。後の文。"]);
    }

    #[test]
    fn test_consecutive_terminators_skipped() {
        let segments = segment("文。。。次。", 300).unwrap();
        assert_eq!(segments, vec!["文。次。"]);
        assert!(segment("。。。", 300).unwrap().is_empty());
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let text = "あ".repeat(700);
        let segments = segment(&text, 300).unwrap();
        let lengths: Vec<usize> = segments.iter().map(|s| char_len(s)).collect();
        assert_eq!(lengths, vec![300, 300, 100]);
    }

    #[test]
    fn test_cut_prefers_space_past_threshold() {
        let text = format!("{} {}", "a".repeat(250), "b".repeat(100));
        let segments = segment(&text, 300).unwrap();
        assert_eq!(segments, vec!["a".repeat(250), "b".repeat(100)]);
    }

    #[test]
    fn test_space_before_threshold_ignored() {
        // 空格位于 100，低于 240，直接在 300 处硬切
        let text = format!("{} {}", "a".repeat(100), "b".repeat(300));
        let segments = segment(&text, 300).unwrap();
        let lengths: Vec<usize> = segments.iter().map(|s| char_len(s)).collect();
        assert_eq!(lengths, vec![300, 101]);
        assert!(segments[0].starts_with(&"a".repeat(100)));
    }

    #[test]
    fn test_space_exactly_at_threshold_qualifies() {
        let text = format!("{} {}", "a".repeat(8), "b".repeat(5));
        let segments = segment(&text, 10).unwrap();
        assert_eq!(segments, vec!["a".repeat(8), "b".repeat(5)]);
    }

    #[test]
    fn test_ascii_space_only_by_default() {
        // 全角空格默认不作为断点
        let text = format!("{}　{}", "あ".repeat(9), "い".repeat(5));
        let segments = segment(&text, 10).unwrap();
        assert_eq!(segments[0], format!("{}　", "あ".repeat(9)).trim());
        assert_eq!(char_len(&segments[0]), 9);
        assert_eq!(segments[1], "い".repeat(5));

        let text = format!("{}\t{}", "a".repeat(9), "b".repeat(5));
        let segments = segment(&text, 10).unwrap();
        assert_eq!(segments[0], format!("{}\t", "a".repeat(9)).trim());
    }

    #[test]
    fn test_unicode_whitespace_break_mode() {
        let config = SegmentConfig::with_max_chars(10).break_mode(BreakMode::Whitespace);
        let text = format!("{}\t{}", "a".repeat(8), "b".repeat(5));
        let segments = segment_text(&text, &config).unwrap();
        assert_eq!(segments, vec!["a".repeat(8), "b".repeat(5)]);
    }

    #[test]
    fn test_configurable_terminators() {
        let config = SegmentConfig::with_max_chars(20).terminators(['.', '!', '?']);
        let text = "Hello there. How are you? Fine!";
        let segments = segment_text(text, &config).unwrap();
        assert_eq!(segments, vec!["Hello there.", "How are you?Fine!"]);
        assert!(segments.iter().all(|s| char_len(s) <= 20));
    }

    #[test]
    fn test_zero_ratio_never_yields_empty_segment() {
        let config = SegmentConfig::with_max_chars(3).split_ratio(0.0);
        let segments = segment_text("a bcdef", &config).unwrap();
        assert!(segments.iter().all(|s| !s.is_empty() && char_len(s) <= 3));
        assert_eq!(segments.concat(), "abcdef");
    }

    #[test]
    fn test_limit_of_one() {
        let segments = segment("ab c。d", 1).unwrap();
        assert_eq!(segments, vec!["a", "b", "c", "。", "d"]);
    }

    #[test]
    fn test_length_bound_and_order_on_mixed_text() {
        let text = "吾輩は猫である。名前はまだ無い。 どこで生れたかとんと見当がつかぬ。\
            何でも薄暗いじめじめした所でニャーニャー泣いていた事だけは記憶している。\
            This is a long English sentence without any Japanese period that goes on and on";
        for limit in [1, 5, 12, 30, 300] {
            let segments = segment(text, limit).unwrap();
            assert!(!segments.is_empty());
            for s in &segments {
                assert!(!s.is_empty());
                assert!(char_len(s) <= limit, "{:?} exceeds {}", s, limit);
                assert_eq!(s.trim(), s);
            }

            // 去除空白后顺序拼接应与原文一致
            let joined: String = segments.concat().chars().filter(|c| !c.is_whitespace()).collect();
            let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(joined, expected);
        }
    }

    #[test]
    fn test_resegmenting_a_segment_is_stable() {
        let text = format!(
            "{}。{} {}。短い文。",
            "あ".repeat(50),
            "b".repeat(260),
            "c".repeat(80)
        );
        for segment_str in segment(&text, 300).unwrap() {
            assert_eq!(segment(&segment_str, 300).unwrap(), vec![segment_str.clone()]);
        }
    }

    #[test]
    fn test_exceeds_counts_chars() {
        assert!(!exceeds("", 0));
        assert!(exceeds("あ", 0));
        assert!(exceeds("あいう", 2));
        assert!(!exceeds("あいう", 3));
        assert!(!exceeds("あいう", 300));
    }

    #[test]
    fn test_large_input_segments_in_linear_time() {
        use std::time::{Duration, Instant};

        let text = "あ".repeat(1_000_000);
        let start = Instant::now();
        let segments = segment(&text, 300).unwrap();
        assert_eq!(segments.len(), 3334);
        assert_eq!(char_len(segments.last().unwrap()), 100);

        // 上限为 1 时每个字符一段
        let text = "a b".repeat(50_000);
        let segments = segment(&text, 1).unwrap();
        assert_eq!(segments.len(), 100_000);
        assert!(
            start.elapsed() < Duration::from_secs(5),
            "segmentation took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn test_default_config() {
        let config = SegmentConfig::default();
        assert_eq!(config.max_chars, 300);
        assert_eq!(config.terminators, vec!['。']);
        assert_eq!(config.split_ratio, 0.8);
        assert_eq!(config.break_mode, BreakMode::AsciiSpace);
    }
}
