/// 清理引擎
///
/// 对每个语言的原始树逐叶处理：删除仍未翻译的占位文本，或从兄弟语言
/// 经字形转换自动填充，最后剪除变空的子树。
use std::collections::HashMap;

use crate::converter::ScriptConverter;
use crate::detector::UntranslatedDetector;
use crate::key_path::{self, Lookup};
use crate::translation_set::{StructuralMismatch, TranslationSet};
use crate::tree::LocaleTree;
use crate::utils::{LocaleError, Result};

/// 单个语言的清理策略
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanPolicy {
    /// 删除被检测为未翻译的叶子
    pub remove_matched: bool,
    /// 从该语言的对应叶子转换填充
    pub convert_from: Option<String>,
}

/// 各语言的清理策略表
#[derive(Debug, Clone, Default)]
pub struct CleanPlan {
    policies: HashMap<String, CleanPolicy>,
    fallback: CleanPolicy,
}

impl CleanPlan {
    /// 未单独指定的语言使用 `fallback`
    pub fn new(fallback: CleanPolicy) -> Self {
        Self {
            policies: HashMap::new(),
            fallback,
        }
    }

    pub fn with_policy(mut self, language: impl Into<String>, policy: CleanPolicy) -> Self {
        self.policies.insert(language.into(), policy);
        self
    }

    pub fn policy(&self, language: &str) -> &CleanPolicy {
        self.policies.get(language).unwrap_or(&self.fallback)
    }
}

/// 单个语言的清理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCleanStats {
    pub language: String,
    pub removed: usize,
    pub converted: usize,
    pub pruned: usize,
}

/// 清理结果报告
#[derive(Debug, Default)]
pub struct CleanReport {
    pub languages: Vec<LanguageCleanStats>,
    pub mismatches: Vec<StructuralMismatch>,
    /// 处理失败的语言（不会出现在输出集合中）
    pub failed: Vec<(String, LocaleError)>,
}

impl std::fmt::Display for CleanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 清理统计 ===")?;
        for stats in &self.languages {
            writeln!(
                f,
                "{}: 删除 {} 条, 转换 {} 条, 剪除空节点 {} 个",
                stats.language, stats.removed, stats.converted, stats.pruned
            )?;
        }
        if !self.mismatches.is_empty() {
            writeln!(f, "结构不一致: {} 处", self.mismatches.len())?;
        }
        for (language, err) in &self.failed {
            writeln!(f, "{}: 失败 ({})", language, err)?;
        }
        Ok(())
    }
}

/// 清理引擎
pub struct CleanEngine<'a> {
    detector: &'a UntranslatedDetector,
    converter: &'a ScriptConverter,
}

impl<'a> CleanEngine<'a> {
    pub fn new(detector: &'a UntranslatedDetector, converter: &'a ScriptConverter) -> Self {
        Self {
            detector,
            converter,
        }
    }

    /// 清理整个集合
    ///
    /// 转换填充读取的是兄弟语言"删除阶段之后"的只读快照，
    /// 因此各语言的处理顺序不影响结果。
    pub fn clean(&self, raw: &TranslationSet, plan: &CleanPlan) -> Result<(TranslationSet, CleanReport)> {
        for language in raw.languages() {
            if let Some(from) = &plan.policy(language).convert_from {
                raw.require(from)?;
            }
        }

        let snapshot: TranslationSet = raw
            .iter()
            .map(|(language, tree)| {
                let stripped = if plan.policy(language).remove_matched {
                    self.strip_untranslated(tree)
                } else {
                    tree.clone()
                };
                (language.to_string(), stripped)
            })
            .collect();

        let mut cleaned = TranslationSet::new();
        let mut report = CleanReport::default();

        for (language, tree) in raw.iter() {
            let policy = plan.policy(language);
            match self.clean_tree(language, tree, policy, &snapshot, &mut report.mismatches) {
                Ok((tree, stats)) => {
                    tracing::info!(
                        language,
                        removed = stats.removed,
                        converted = stats.converted,
                        pruned = stats.pruned,
                        "cleaned locale tree"
                    );
                    cleaned.insert(language, tree);
                    report.languages.push(stats);
                }
                Err(err) => {
                    tracing::warn!(language, error = %err, "clean aborted for language");
                    report.failed.push((language.to_string(), err));
                }
            }
        }

        Ok((cleaned, report))
    }

    /// 清理单个语言的树
    fn clean_tree(
        &self,
        language: &str,
        raw: &LocaleTree,
        policy: &CleanPolicy,
        snapshot: &TranslationSet,
        mismatches: &mut Vec<StructuralMismatch>,
    ) -> Result<(LocaleTree, LanguageCleanStats)> {
        let mut tree = raw.clone();
        let mut stats = LanguageCleanStats {
            language: language.to_string(),
            ..Default::default()
        };

        let sibling = match &policy.convert_from {
            Some(from) => Some(snapshot.require(from)?),
            None => None,
        };

        for (path, text) in key_path::flatten(raw) {
            if policy.remove_matched && self.detector.classify(text) {
                key_path::remove(&mut tree, &path);
                stats.removed += 1;
                tracing::debug!(language, path = %path, "removed untranslated leaf");
                continue;
            }

            let Some(sibling) = sibling else {
                continue;
            };

            match key_path::lookup(sibling, &path) {
                Lookup::Leaf(source) => {
                    let converted = self.converter.convert(source);
                    if key_path::ensure(&mut tree, &path, &converted)? {
                        stats.converted += 1;
                        tracing::debug!(language, path = %path, "filled leaf by script conversion");
                    }
                }
                Lookup::Mismatch => {
                    let from = policy.convert_from.clone().unwrap_or_default();
                    tracing::warn!(language = %from, path = %path, "structural mismatch, treated as absent");
                    mismatches.push(StructuralMismatch { language: from, path });
                }
                Lookup::Absent => {}
            }
        }

        stats.pruned = key_path::prune(&mut tree);
        Ok((tree, stats))
    }

    /// 删除所有被检测为未翻译的叶子（不剪枝）
    fn strip_untranslated(&self, tree: &LocaleTree) -> LocaleTree {
        let mut stripped = tree.clone();
        for (path, text) in key_path::flatten(tree) {
            if self.detector.classify(text) {
                key_path::remove(&mut stripped, &path);
            }
        }
        stripped
    }
}
