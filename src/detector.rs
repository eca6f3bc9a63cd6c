use regex::Regex;

use crate::utils::Result;

/// 默认检测模式：任意 CJK 统一汉字（U+4E00..U+9FA5）
pub const DEFAULT_PATTERN: &str = r"[一-龥]";

/// 未翻译文本检测器
///
/// 文本只要包含一处模式匹配即视为"仍需翻译"。
/// 检测器本身不携带删除/上报策略，策略由调用方决定。
#[derive(Debug, Clone)]
pub struct UntranslatedDetector {
    pattern: Regex,
}

impl UntranslatedDetector {
    /// 从正则表达式字符串创建
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// 判断文本是否仍未翻译
    pub fn classify(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for UntranslatedDetector {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PATTERN).expect("default pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let detector = UntranslatedDetector::default();

        assert!(detector.classify("登录"));
        assert!(detector.classify("Mixed 中英文 text"));
        assert!(!detector.classify("Login"));
        assert!(!detector.classify(""));
        // 平假名不在默认范围内
        assert!(!detector.classify("ログイン"));
    }

    #[test]
    fn test_custom_pattern() {
        let detector = UntranslatedDetector::new(r"^TODO:").unwrap();
        assert!(detector.classify("TODO: translate me"));
        assert!(!detector.classify("Done"));
        assert_eq!(detector.pattern(), r"^TODO:");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(UntranslatedDetector::new("[unclosed").is_err());
    }
}
