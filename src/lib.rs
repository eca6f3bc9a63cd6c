pub mod tree;
pub mod key_path;
pub mod translation_set;
pub mod detector;
pub mod converter;
pub mod clean;
pub mod diff;
pub mod merge;
pub mod io;
pub mod config;
pub mod commands;
pub mod utils;

// 重新导出主要结构
pub use tree::{LocaleTree, Node};
pub use key_path::{KeyPath, Lookup};
pub use translation_set::{StructuralMismatch, TranslationSet};
pub use detector::UntranslatedDetector;
pub use converter::{ConvertDirection, ScriptConverter};
pub use clean::{CleanEngine, CleanPlan, CleanPolicy, CleanReport};
pub use diff::{DiffExtractor, DiffOptions, DiffReport, UntranslatedEntry};
pub use merge::{MergeOptions, MergeReport, StalePolicy, TranslationMerger, TranslationRow};
pub use config::{Config, ConfigOverrides, ConfigProvider, DefaultConfigProvider, FileConfigProvider};
pub use utils::{LocaleError, Result};

// 常量定义
pub const LOCALE_EXTENSION: &str = "json";
