/// IO 抽象层 - trait 定义
///
/// 核心引擎只依赖这里的接口，不直接接触文件格式。
/// 便于替换实现（如内存存储）和测试 mock。
use rayon::prelude::*;

use crate::diff::UntranslatedEntry;
use crate::merge::TranslationRow;
use crate::translation_set::TranslationSet;
use crate::tree::LocaleTree;
use crate::utils::Result;

/// 翻译树存储 trait
///
/// # 职责
/// - 按语言标识读取/写入一棵翻译树
/// - 序列化必须保持键的插入顺序
///
/// # 实现示例
/// ```rust,ignore
/// struct MemoryStore(Mutex<HashMap<String, LocaleTree>>);
/// impl TreeStore for MemoryStore {
///     fn load(&self, language: &str) -> Result<LocaleTree> {
///         Ok(self.0.lock().unwrap().get(language).cloned().unwrap_or_default())
///     }
///     fn save(&self, language: &str, tree: &LocaleTree) -> Result<()> {
///         self.0.lock().unwrap().insert(language.to_string(), tree.clone());
///         Ok(())
///     }
/// }
/// ```
pub trait TreeStore {
    /// 读取语言树；不存在的语言返回空树
    fn load(&self, language: &str) -> Result<LocaleTree>;

    /// 写入语言树
    fn save(&self, language: &str, tree: &LocaleTree) -> Result<()>;

    /// 并行读取多个语言，结果按 `languages` 顺序排列
    fn load_set(&self, languages: &[String]) -> Result<TranslationSet>
    where
        Self: Sync,
    {
        let trees = languages
            .par_iter()
            .map(|language| self.load(language).map(|tree| (language.clone(), tree)))
            .collect::<Result<Vec<_>>>()?;

        Ok(trees.into_iter().collect())
    }

    /// 并行写入整个集合
    fn save_set(&self, set: &TranslationSet) -> Result<()>
    where
        Self: Sync,
    {
        let trees: Vec<(&str, &LocaleTree)> = set.iter().collect();
        trees
            .par_iter()
            .try_for_each(|(language, tree)| self.save(language, tree))
    }
}

/// 表格行读取 trait
pub trait RowReader {
    /// 读取所有可编辑行
    fn read_rows(&self) -> Result<Vec<TranslationRow>>;
}

/// 表格行写入 trait
pub trait RowWriter {
    /// 写入未翻译条目
    ///
    /// # 参数
    /// * `targets` - 目标语言列（按顺序）
    /// * `entries` - 差异提取得到的条目
    fn write_rows(&self, targets: &[String], entries: &[UntranslatedEntry]) -> Result<()>;
}
