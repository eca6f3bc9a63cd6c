/// JSON 翻译树存储
///
/// 每个语言一个文件：`{root}/{language}.json`
use std::path::PathBuf;

use super::traits::TreeStore;
use crate::tree::LocaleTree;
use crate::utils::{create_backup, Result};

/// 基于文件系统的 JSON 存储
#[derive(Debug, Clone)]
pub struct JsonTreeStore {
    root: PathBuf,
    /// 覆盖已有文件前先创建备份
    backup: bool,
}

impl JsonTreeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            backup: false,
        }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// 语言对应的文件路径
    pub fn path_for(&self, language: &str) -> PathBuf {
        self.root.join(format!("{}.{}", language, crate::LOCALE_EXTENSION))
    }
}

/// 序列化为带缩进的 JSON 文本（2 空格缩进，末尾换行）
pub fn to_json_text(tree: &LocaleTree) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&tree.to_json())?;
    text.push('\n');
    Ok(text)
}

impl TreeStore for JsonTreeStore {
    fn load(&self, language: &str) -> Result<LocaleTree> {
        let path = self.path_for(language);
        if !path.exists() {
            tracing::debug!(language, path = %path.display(), "locale file not found, starting empty");
            return Ok(LocaleTree::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let tree = LocaleTree::from_json(value).inspect_err(|err| {
            tracing::error!(language, path = %path.display(), error = %err, "invalid locale file");
        })?;

        tracing::debug!(language, leaves = tree.leaf_count(), "loaded locale tree");
        Ok(tree)
    }

    fn save(&self, language: &str, tree: &LocaleTree) -> Result<()> {
        let path = self.path_for(language);
        let text = to_json_text(tree)?;

        if path.exists() {
            if std::fs::read_to_string(&path).ok().as_deref() == Some(text.as_str()) {
                tracing::debug!(language, "locale file unchanged");
                return Ok(());
            }
            if self.backup {
                let backup_path = create_backup(&path)?;
                tracing::info!(language, backup = %backup_path.display(), "created backup");
            }
        }

        // 确保父目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, text)?;
        tracing::debug!(language, path = %path.display(), "saved locale tree");
        Ok(())
    }
}
