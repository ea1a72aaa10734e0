//! 合成语言
//!
//! 语言选择既可以是裸语言代码（`ja`），也可以是下拉框里的显示标签（`日本語 (ja)`）

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认合成语言
pub const DEFAULT_LANGUAGE_CODE: &str = "ja";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("Language selection is empty")]
    Empty,
}

/// 可选语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub label: &'static str,
}

impl Language {
    /// 下拉框显示文本，例如 `日本語 (ja)`
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.code)
    }
}

/// 支持的语言列表
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "ja", label: "日本語" },
    Language { code: "en", label: "英語" },
    Language { code: "ko", label: "韓国語" },
    Language { code: "zh-CN", label: "中国語" },
    Language { code: "fr", label: "フランス語" },
    Language { code: "de", label: "ドイツ語" },
    Language { code: "es", label: "スペイン語" },
];

/// 按语言代码查找
pub fn find_language(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
}

/// 语言代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 从语言选择解析语言代码
    ///
    /// 含有 `(...)` 时取第一个 `(` 与最后一个 `)` 之间的内容，否则整体作为代码。
    /// 未知代码原样保留，由合成服务决定是否支持。
    pub fn parse(selection: &str) -> Result<Self, LanguageError> {
        let selection = selection.trim();
        let code = match (selection.find('('), selection.rfind(')')) {
            (Some(open), Some(close)) if open < close => &selection[open + 1..close],
            _ => selection,
        };

        let code = code.trim();
        if code.is_empty() {
            return Err(LanguageError::Empty);
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否在支持列表中
    pub fn is_supported(&self) -> bool {
        find_language(&self.0).is_some()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE_CODE.to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
