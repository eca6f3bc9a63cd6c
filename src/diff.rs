/// 差异提取
///
/// 遍历来源语言的树，把仍未翻译的叶子连同各目标语言的当前值
/// 整理成有序条目，交给外部表格写入器。
use indexmap::IndexMap;

use crate::detector::UntranslatedDetector;
use crate::key_path::{self, KeyPath, Lookup};
use crate::translation_set::{StructuralMismatch, TranslationSet};

/// 未翻译条目
///
/// `targets` 按目标语言顺序排列，`None` 表示该语言中不存在此路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedEntry {
    pub path: KeyPath,
    pub source: String,
    pub targets: IndexMap<String, Option<String>>,
}

impl UntranslatedEntry {
    pub fn target(&self, language: &str) -> Option<&str> {
        self.targets.get(language).and_then(|value| value.as_deref())
    }
}

/// 差异提取参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// 来源语言
    pub source: String,
    /// 需要输出的目标语言
    pub targets: Vec<String>,
    /// 所有目标语言都已有译文时跳过该条目
    pub skip_translated: bool,
}

/// 差异提取结果
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    pub entries: Vec<UntranslatedEntry>,
    pub mismatches: Vec<StructuralMismatch>,
}

/// 差异提取器
pub struct DiffExtractor<'a> {
    detector: &'a UntranslatedDetector,
}

impl<'a> DiffExtractor<'a> {
    pub fn new(detector: &'a UntranslatedDetector) -> Self {
        Self { detector }
    }

    /// 提取未翻译条目
    ///
    /// 输出顺序与来源树的深度优先、插入顺序一致；
    /// 同一输入多次运行结果完全相同。
    pub fn extract(&self, set: &TranslationSet, options: &DiffOptions) -> crate::Result<DiffReport> {
        let source_tree = set.require(&options.source)?;
        let mut report = DiffReport::default();

        for (path, source_text) in key_path::flatten(source_tree) {
            if !self.detector.classify(source_text) {
                continue;
            }

            let mut targets = IndexMap::with_capacity(options.targets.len());
            for language in &options.targets {
                let value = match set.get(language).map(|tree| key_path::lookup(tree, &path)) {
                    Some(Lookup::Leaf(text)) => Some(text.to_string()),
                    Some(Lookup::Mismatch) => {
                        tracing::warn!(language = %language, path = %path, "structural mismatch, treated as absent");
                        report.mismatches.push(StructuralMismatch {
                            language: language.clone(),
                            path: path.clone(),
                        });
                        None
                    }
                    Some(Lookup::Absent) | None => None,
                };
                targets.insert(language.clone(), value);
            }

            if options.skip_translated && self.all_translated(&targets) {
                tracing::debug!(path = %path, "skipped, every target is translated");
                continue;
            }

            report.entries.push(UntranslatedEntry {
                path,
                source: source_text.to_string(),
                targets,
            });
        }

        tracing::info!(
            source = %options.source,
            entries = report.entries.len(),
            "extracted untranslated entries"
        );

        Ok(report)
    }

    fn all_translated(&self, targets: &IndexMap<String, Option<String>>) -> bool {
        !targets.is_empty()
            && targets.values().all(|value| match value {
                Some(text) => !self.detector.classify(text),
                None => false,
            })
    }
}
