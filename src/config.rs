/// 配置模块
///
/// 每个命令一个强类型配置结构，默认值即工具的内置约定。
/// 用户覆盖项以全 `Option` 的结构表示，按"默认 < 配置文件 < 命令行"
/// 的顺序逐层叠加。配置在进程启动时解析一次，按值传入各命令。
use std::path::PathBuf;

use serde::Deserialize;

use crate::clean::{CleanPlan, CleanPolicy};
use crate::detector::DEFAULT_PATTERN;
use crate::diff::DiffOptions;
use crate::merge::{MergeOptions, StalePolicy};
use crate::utils::{LocaleError, Result};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "i18n-lifecycle.toml";

/// 完整配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 覆盖文件前创建备份
    pub backup: bool,
    pub clean: CleanConfig,
    pub diff: DiffConfig,
    pub translate: TranslateConfig,
}

/// clean 命令配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub langs: Vec<String>,
    /// 来源语言（原文所用语言）
    pub source: String,
    pub pattern: String,
    /// 删除仍未翻译的叶子
    pub remove: bool,
    /// 从来源语言字形转换填充 `convert_target`
    pub auto_convert: bool,
    pub convert_target: String,
    /// 不做删除的语言（原文与其字形变体）
    pub keep: Vec<String>,
}

/// diff 命令配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    pub input: PathBuf,
    /// 表格输出目录
    pub output: PathBuf,
    pub file_name: String,
    pub source: String,
    pub langs: Vec<String>,
    pub pattern: String,
    pub skip_translated: bool,
}

/// translate 命令配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 译者编辑后的表格文件
    pub rows: PathBuf,
    pub source: String,
    pub langs: Vec<String>,
    pub stale: StalePolicy,
    /// 表格文件无 BOM 时的编码
    pub encoding: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./src/locales/raw"),
            output: PathBuf::from("./src/locales"),
            langs: strings(&["en", "zh-cn", "zh-tw", "jp", "ko"]),
            source: "zh-cn".to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            remove: true,
            auto_convert: true,
            convert_target: "zh-tw".to_string(),
            keep: strings(&["zh-cn", "zh-tw"]),
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./src/locales/raw"),
            output: PathBuf::from("./src/locales/diff"),
            file_name: "untranslated.csv".to_string(),
            source: "zh-cn".to_string(),
            langs: strings(&["en"]),
            pattern: DEFAULT_PATTERN.to_string(),
            skip_translated: false,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./src/locales/raw"),
            output: PathBuf::from("./src/locales/raw"),
            rows: PathBuf::from("./src/locales/diff/untranslated.csv"),
            source: "zh-cn".to_string(),
            langs: strings(&["en"]),
            stale: StalePolicy::Ignore,
            encoding: "utf-8".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup: false,
            clean: CleanConfig::default(),
            diff: DiffConfig::default(),
            translate: TranslateConfig::default(),
        }
    }
}

impl CleanConfig {
    /// 由配置生成各语言的清理策略
    pub fn plan(&self) -> CleanPlan {
        let mut plan = CleanPlan::new(CleanPolicy {
            remove_matched: self.remove,
            convert_from: None,
        });

        for language in &self.keep {
            plan = plan.with_policy(language.clone(), CleanPolicy::default());
        }

        if self.auto_convert {
            plan = plan.with_policy(
                self.convert_target.clone(),
                CleanPolicy {
                    remove_matched: self.remove && !self.keep.contains(&self.convert_target),
                    convert_from: Some(self.source.clone()),
                },
            );
        }

        plan
    }

    /// 需要加载的语言（保证包含来源语言）
    pub fn languages(&self) -> Vec<String> {
        with_source(&self.langs, &self.source)
    }
}

impl DiffConfig {
    pub fn options(&self) -> DiffOptions {
        DiffOptions {
            source: self.source.clone(),
            targets: self.targets(),
            skip_translated: self.skip_translated,
        }
    }

    pub fn rows_path(&self) -> PathBuf {
        self.output.join(&self.file_name)
    }

    pub fn languages(&self) -> Vec<String> {
        with_source(&self.langs, &self.source)
    }

    fn targets(&self) -> Vec<String> {
        self.langs.iter().filter(|l| **l != self.source).cloned().collect()
    }
}

impl TranslateConfig {
    pub fn options(&self) -> MergeOptions {
        MergeOptions {
            source: self.source.clone(),
            targets: self.langs.iter().filter(|l| **l != self.source).cloned().collect(),
            stale_policy: self.stale,
        }
    }

    pub fn languages(&self) -> Vec<String> {
        with_source(&self.langs, &self.source)
    }
}

fn with_source(langs: &[String], source: &str) -> Vec<String> {
    let mut languages = vec![source.to_string()];
    languages.extend(langs.iter().filter(|l| *l != source).cloned());
    languages
}

// ============================================================================
// 覆盖层
// ============================================================================

/// 配置覆盖项（配置文件与命令行共用）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub backup: Option<bool>,
    pub clean: Option<CleanOverrides>,
    pub diff: Option<DiffOverrides>,
    pub translate: Option<TranslateOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub langs: Option<Vec<String>>,
    pub source: Option<String>,
    pub pattern: Option<String>,
    pub remove: Option<bool>,
    pub auto_convert: Option<bool>,
    pub convert_target: Option<String>,
    pub keep: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub file_name: Option<String>,
    pub source: Option<String>,
    pub langs: Option<Vec<String>>,
    pub pattern: Option<String>,
    pub skip_translated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub rows: Option<PathBuf>,
    pub source: Option<String>,
    pub langs: Option<Vec<String>>,
    pub stale: Option<StalePolicy>,
    pub encoding: Option<String>,
}

macro_rules! overlay {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = value;
            }
        )+
    };
}

impl Config {
    /// 在默认配置上依次叠加覆盖层，后面的层优先
    pub fn layered(layers: impl IntoIterator<Item = ConfigOverrides>) -> Self {
        let mut config = Config::default();
        for layer in layers {
            config.apply(layer);
        }
        config
    }

    /// 通过配置提供者解析配置，再叠加命令行覆盖项
    pub fn resolve(provider: &dyn ConfigProvider, cli: ConfigOverrides) -> Result<Self> {
        let file = provider.overrides()?;
        let config = Self::layered([file, cli]);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(backup) = overrides.backup {
            self.backup = backup;
        }
        if let Some(clean) = overrides.clean {
            overlay!(self.clean, clean, input, output, langs, source, pattern, remove, auto_convert, convert_target, keep);
        }
        if let Some(diff) = overrides.diff {
            overlay!(self.diff, diff, input, output, file_name, source, langs, pattern, skip_translated);
        }
        if let Some(translate) = overrides.translate {
            overlay!(self.translate, translate, input, output, rows, source, langs, stale, encoding);
        }
    }

    /// 基本合法性检查
    pub fn validate(&self) -> Result<()> {
        let sections: [(&str, &[String], &str); 3] = [
            ("clean", &self.clean.langs, &self.clean.source),
            ("diff", &self.diff.langs, &self.diff.source),
            ("translate", &self.translate.langs, &self.translate.source),
        ];

        for (name, langs, source) in sections {
            if langs.is_empty() {
                return Err(LocaleError::Config(format!("[{}] langs must not be empty", name)));
            }
            check_language(name, "source", source)?;
            for language in langs {
                check_language(name, "langs", language)?;
            }
        }

        check_language("clean", "convert_target", &self.clean.convert_target)?;
        for language in &self.clean.keep {
            check_language("clean", "keep", language)?;
        }

        Ok(())
    }
}

/// 语言名会直接用作文件名，不能为空或包含路径分隔符
fn check_language(section: &str, field: &str, language: &str) -> Result<()> {
    if language.trim().is_empty() || language.contains(['/', '\\']) {
        return Err(LocaleError::Config(format!(
            "[{}] invalid language '{}' in {}",
            section, language, field
        )));
    }
    Ok(())
}

// ============================================================================
// 配置提供者
// ============================================================================

/// 配置提供者：在进程启动时解析一次，产出用户覆盖项
pub trait ConfigProvider {
    fn overrides(&self) -> Result<ConfigOverrides>;
}

/// 不提供任何覆盖（使用内置默认值）
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigProvider;

impl ConfigProvider for DefaultConfigProvider {
    fn overrides(&self) -> Result<ConfigOverrides> {
        Ok(ConfigOverrides::default())
    }
}

/// 从 TOML 文件读取覆盖项
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
    /// 文件不存在时是否报错（显式指定的文件必须存在）
    required: bool,
}

impl FileConfigProvider {
    /// 显式指定的配置文件
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// 当前目录下的默认配置文件，可以不存在
    pub fn default_file() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            required: false,
        }
    }

    pub fn parse(content: &str) -> Result<ConfigOverrides> {
        Ok(toml::from_str(content)?)
    }
}

impl ConfigProvider for FileConfigProvider {
    fn overrides(&self) -> Result<ConfigOverrides> {
        if !self.path.exists() {
            if self.required {
                return Err(LocaleError::Config(format!(
                    "config file not found: {}",
                    self.path.display()
                )));
            }
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ConfigOverrides::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let overrides = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), "loaded config file");
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.clean.langs, vec!["en", "zh-cn", "zh-tw", "jp", "ko"]);
        assert_eq!(config.clean.output, PathBuf::from("./src/locales"));
        assert_eq!(config.diff.rows_path(), PathBuf::from("./src/locales/diff/untranslated.csv"));
        assert_eq!(config.translate.stale, StalePolicy::Ignore);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clean_plan() {
        let plan = Config::default().clean.plan();

        assert_eq!(plan.policy("zh-cn"), &CleanPolicy::default());
        assert_eq!(
            plan.policy("zh-tw"),
            &CleanPolicy {
                remove_matched: false,
                convert_from: Some("zh-cn".to_string())
            }
        );
        assert!(plan.policy("en").remove_matched);
        assert!(plan.policy("ko").remove_matched);
    }

    #[test]
    fn test_layer_order() {
        let file = FileConfigProvider::parse(
            r#"
            backup = true

            [diff]
            langs = ["en", "ko"]
            skip_translated = true

            [translate]
            stale = "warn"
            "#,
        )
        .unwrap();

        let cli = ConfigOverrides {
            diff: Some(DiffOverrides {
                langs: Some(vec!["jp".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = Config::layered([file, cli]);
        assert!(config.backup);
        assert_eq!(config.diff.langs, vec!["jp"]);
        assert!(config.diff.skip_translated);
        assert_eq!(config.translate.stale, StalePolicy::Warn);
        // 未覆盖的字段保持默认
        assert_eq!(config.diff.source, "zh-cn");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(FileConfigProvider::parse("[clean]\nremve = false\n").is_err());
    }

    #[test]
    fn test_languages_include_source_once() {
        let mut diff = DiffConfig::default();
        diff.langs = vec!["zh-cn".to_string(), "en".to_string()];
        assert_eq!(diff.languages(), vec!["zh-cn", "en"]);
        assert_eq!(diff.options().targets, vec!["en"]);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.translate.langs.clear();
        assert!(matches!(config.validate(), Err(LocaleError::Config(_))));

        let mut config = Config::default();
        config.clean.langs.push("../etc".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clean.source = "../escape".to_string();
        assert!(matches!(config.validate(), Err(LocaleError::Config(_))));

        let mut config = Config::default();
        config.translate.source = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clean.convert_target = "a\\b".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clean.keep.push("x/y".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_provider() {
        let temp_dir = TempDir::new().unwrap();
        let missing = FileConfigProvider::new(temp_dir.path().join("none.toml"));
        assert!(missing.overrides().is_err());

        let path = temp_dir.path().join("i18n.toml");
        std::fs::write(&path, "[clean]\nremove = false\n").unwrap();
        let config = Config::resolve(&FileConfigProvider::new(&path), ConfigOverrides::default()).unwrap();
        assert!(!config.clean.remove);

        let config = Config::resolve(&DefaultConfigProvider, ConfigOverrides::default()).unwrap();
        assert_eq!(config, Config::default());
    }
}
