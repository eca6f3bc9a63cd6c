use thiserror::Error;
use std::path::{Path, PathBuf};

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum LocaleError {
    /// 路径需要穿过一个已存在的叶子节点（或在子树位置写入叶子）
    #[error("Path conflict at '{path}'")]
    PathConflict { path: String },

    #[error("Invalid key path: {0}")]
    InvalidKeyPath(String),

    #[error("Unsupported value at '{path}': {kind} (only strings and objects are allowed)")]
    UnsupportedValue { path: String, kind: &'static str },

    #[error("Language not loaded: {0}")]
    MissingLanguage(String),

    #[error("Invalid detection pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Malformed row file: {0}")]
    RowFormat(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LocaleError>;

/// 创建文件备份
///
/// 备份文件与原文件同目录，扩展名替换为 `{时间戳}.bak`。
pub fn create_backup(file_path: &Path) -> Result<PathBuf> {
    if !file_path.exists() {
        return Err(LocaleError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在",
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup_path = file_path.with_extension(format!("{}.bak", timestamp));

    std::fs::copy(file_path, &backup_path)?;

    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = create_backup(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(LocaleError::IoError(_))));
    }

    #[test]
    fn test_backup_copies_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        std::fs::write(&path, "{\"a\": \"b\"}").unwrap();

        let backup = create_backup(&path).unwrap();
        assert_ne!(backup, path);
        assert!(backup.to_string_lossy().ends_with(".bak"));
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_error_messages() {
        let err = LocaleError::PathConflict { path: "a.b".to_string() };
        assert_eq!(err.to_string(), "Path conflict at 'a.b'");

        let err = LocaleError::MissingLanguage("zh-cn".to_string());
        assert_eq!(err.to_string(), "Language not loaded: zh-cn");
    }
}
