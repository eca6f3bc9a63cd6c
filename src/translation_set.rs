use indexmap::IndexMap;

use crate::key_path::KeyPath;
use crate::tree::LocaleTree;
use crate::utils::{LocaleError, Result};

/// 结构不一致警告：某语言在期望叶子的位置上是子树（或路径途经叶子）
///
/// 不是错误，该位置的值按"不存在"处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralMismatch {
    pub language: String,
    pub path: KeyPath,
}

impl std::fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} is not a leaf", self.language, self.path)
    }
}

/// 多语言翻译树集合（语言标识 -> 该语言的翻译树）
///
/// 语言按加载顺序保存。各语言之间在逻辑上相互独立，
/// 允许某个语言缺少键或多出键。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    trees: IndexMap<String, LocaleTree>,
}

impl TranslationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, tree: LocaleTree) -> Option<LocaleTree> {
        self.trees.insert(language.into(), tree)
    }

    pub fn get(&self, language: &str) -> Option<&LocaleTree> {
        self.trees.get(language)
    }

    /// 获取语言树，不存在时返回 `MissingLanguage`
    pub fn require(&self, language: &str) -> Result<&LocaleTree> {
        self.trees
            .get(language)
            .ok_or_else(|| LocaleError::MissingLanguage(language.to_string()))
    }

    /// 获取语言树，不存在时插入空树
    pub fn get_or_insert(&mut self, language: &str) -> &mut LocaleTree {
        self.trees.entry(language.to_string()).or_default()
    }

    pub fn contains(&self, language: &str) -> bool {
        self.trees.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleTree)> {
        self.trees.iter().map(|(lang, tree)| (lang.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl FromIterator<(String, LocaleTree)> for TranslationSet {
    fn from_iter<I: IntoIterator<Item = (String, LocaleTree)>>(iter: I) -> Self {
        Self {
            trees: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TranslationSet {
    type Item = (String, LocaleTree);
    type IntoIter = indexmap::map::IntoIter<String, LocaleTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_order_and_lookup() {
        let mut set = TranslationSet::new();
        set.insert("zh-cn", LocaleTree::new());
        set.insert("en", LocaleTree::new());

        assert_eq!(set.languages().collect::<Vec<_>>(), vec!["zh-cn", "en"]);
        assert!(set.require("en").is_ok());
        assert!(matches!(set.require("ko"), Err(LocaleError::MissingLanguage(l)) if l == "ko"));
    }

    #[test]
    fn test_get_or_insert() {
        let mut set = TranslationSet::new();
        assert!(!set.contains("en"));
        set.get_or_insert("en");
        assert!(set.contains("en"));
        assert_eq!(set.len(), 1);
    }
}
