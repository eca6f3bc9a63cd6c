/// IO 抽象层模块
///
/// 该模块提供翻译树和表格行的读写接口以及默认的文件实现。
/// 核心引擎只处理内存中的 `TranslationSet`，所有文件读写都在这里完成。
///
/// # 架构设计
///
/// - **traits**: 定义 TreeStore / RowReader / RowWriter 接口
/// - **json_store**: 每语言一个 JSON 文件的默认实现
/// - **csv_rows**: CSV 表格行的默认实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use i18n_lifecycle::io::{JsonTreeStore, TreeStore};
///
/// let store = JsonTreeStore::new("./src/locales/raw");
/// let set = store.load_set(&["zh-cn".to_string(), "en".to_string()])?;
/// ```
pub mod traits;
pub mod json_store;
pub mod csv_rows;

// === 导出 trait 定义 ===
pub use traits::{RowReader, RowWriter, TreeStore};

// === 导出默认实现 ===
pub use csv_rows::{encoding_for_label, CsvRowReader, CsvRowWriter};
pub use json_store::JsonTreeStore;
