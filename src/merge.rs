/// 译文合并
///
/// 把外部编辑过的表格行写回各目标语言的树。空单元格表示"不修改"；
/// 已在来源语言中消失的过期行按策略处理。
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::diff::UntranslatedEntry;
use crate::key_path::{self, KeyPath, Lookup};
use crate::translation_set::TranslationSet;
use crate::utils::{LocaleError, Result};

/// 可编辑的表格行
///
/// `cells` 中 `None` 表示空单元格（不修改）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub path: KeyPath,
    /// 来源文本，仅作上下文
    pub source: String,
    pub cells: IndexMap<String, Option<String>>,
}

impl TranslationRow {
    /// 语言列名不区分 ASCII 大小写（`EN` 与 `en` 视为同一列）
    pub fn cell(&self, language: &str) -> Option<&str> {
        self.cells
            .get(language)
            .or_else(|| {
                self.cells
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(language))
                    .map(|(_, cell)| cell)
            })
            .and_then(|cell| cell.as_deref())
    }
}

impl From<&UntranslatedEntry> for TranslationRow {
    fn from(entry: &UntranslatedEntry) -> Self {
        Self {
            path: entry.path.clone(),
            source: entry.source.clone(),
            cells: entry.targets.clone(),
        }
    }
}

/// 过期行（来源语言中已不存在的路径）处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// 静默跳过
    #[default]
    Ignore,
    /// 跳过并记录到报告
    Warn,
    /// 照常写入
    Apply,
}

impl FromStr for StalePolicy {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(StalePolicy::Ignore),
            "warn" => Ok(StalePolicy::Warn),
            "apply" => Ok(StalePolicy::Apply),
            other => Err(LocaleError::Config(format!(
                "unknown stale policy '{}' (expected ignore, warn or apply)",
                other
            ))),
        }
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StalePolicy::Ignore => "ignore",
            StalePolicy::Warn => "warn",
            StalePolicy::Apply => "apply",
        };
        write!(f, "{}", name)
    }
}

/// 合并参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// 用于判断过期行的来源语言
    pub source: String,
    /// 允许写入的目标语言；其他语言列会被忽略
    pub targets: Vec<String>,
    pub stale_policy: StalePolicy,
}

/// 合并结果报告
#[derive(Debug, Default)]
pub struct MergeReport {
    /// 各语言实际改变的叶子数量
    pub applied: IndexMap<String, usize>,
    /// 被跳过的过期行数量
    pub skipped_stale: usize,
    /// `Warn` 策略下记录的过期路径
    pub stale: Vec<KeyPath>,
    /// 因路径冲突而整体放弃的语言（树保持原样）
    pub failed: Vec<(String, LocaleError)>,
}

impl MergeReport {
    pub fn total_applied(&self) -> usize {
        self.applied.values().sum()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== 合并统计 ===")?;
        for (language, count) in &self.applied {
            writeln!(f, "{}: 写入 {} 条", language, count)?;
        }
        if self.skipped_stale > 0 {
            writeln!(f, "跳过过期行: {} 条", self.skipped_stale)?;
        }
        for path in &self.stale {
            writeln!(f, "  过期: {}", path)?;
        }
        for (language, err) in &self.failed {
            writeln!(f, "{}: 失败 ({})", language, err)?;
        }
        Ok(())
    }
}

/// 译文合并器
///
/// 合并是幂等的：同一批行再次合并不会产生任何修改。
/// 两批行写同一路径时后合并者生效（不满足交换律）。
pub struct TranslationMerger {
    options: MergeOptions,
}

impl TranslationMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn merge(
        &self,
        mut set: TranslationSet,
        rows: &[TranslationRow],
    ) -> Result<(TranslationSet, MergeReport)> {
        let mut report = MergeReport::default();
        self.warn_unmatched_columns(rows);
        let live_rows = self.filter_stale(&set, rows, &mut report)?;

        for language in &self.options.targets {
            let original = set.get(language).cloned();
            let mut working = original.clone().unwrap_or_default();
            let mut changed = 0;
            let mut conflict = None;

            for row in &live_rows {
                let Some(text) = row.cell(language) else {
                    continue;
                };
                match key_path::ensure(&mut working, &row.path, text) {
                    Ok(true) => changed += 1,
                    Ok(false) => {}
                    Err(err) => {
                        conflict = Some(err);
                        break;
                    }
                }
            }

            if let Some(err) = conflict {
                tracing::warn!(language = %language, error = %err, "merge aborted for language");
                report.failed.push((language.clone(), err));
                continue;
            }

            tracing::info!(language = %language, applied = changed, "merged translations");
            report.applied.insert(language.clone(), changed);
            if original.is_some() || changed > 0 {
                set.insert(language.as_str(), working);
            }
        }

        Ok((set, report))
    }

    /// 对不属于任何目标语言的列给出警告，这些列的内容不会被写入
    fn warn_unmatched_columns(&self, rows: &[TranslationRow]) {
        let mut warned: Vec<&str> = Vec::new();
        for column in rows.iter().flat_map(|row| row.cells.keys()) {
            let matched = self
                .options
                .targets
                .iter()
                .any(|target| target.eq_ignore_ascii_case(column));
            if !matched && !warned.contains(&column.as_str()) {
                tracing::warn!(column = %column, "language column matches no merge target, ignored");
                warned.push(column.as_str());
            }
        }
    }

    /// 按过期策略筛选出需要应用的行
    fn filter_stale<'r>(
        &self,
        set: &TranslationSet,
        rows: &'r [TranslationRow],
        report: &mut MergeReport,
    ) -> Result<Vec<&'r TranslationRow>> {
        let source = set.require(&self.options.source)?;
        let mut live = Vec::with_capacity(rows.len());

        for row in rows {
            let stale = !matches!(key_path::lookup(source, &row.path), Lookup::Leaf(_));
            if !stale {
                live.push(row);
                continue;
            }

            match self.options.stale_policy {
                StalePolicy::Apply => {
                    tracing::debug!(path = %row.path, "applying stale row");
                    live.push(row);
                }
                StalePolicy::Warn => {
                    tracing::warn!(path = %row.path, "stale row skipped");
                    report.skipped_stale += 1;
                    report.stale.push(row.path.clone());
                }
                StalePolicy::Ignore => {
                    tracing::debug!(path = %row.path, "stale row ignored");
                    report.skipped_stale += 1;
                }
            }
        }

        Ok(live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::LocaleTree;
    use serde_json::json;

    fn set(value: serde_json::Value) -> TranslationSet {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(lang, tree)| (lang.clone(), LocaleTree::from_json(tree.clone()).unwrap()))
            .collect()
    }

    /// 逐语言的序列化文本，比较时区分键的顺序
    fn serialized(set: &TranslationSet) -> Vec<(String, String)> {
        set.iter()
            .map(|(lang, tree)| (lang.to_string(), serde_json::to_string(&tree.to_json()).unwrap()))
            .collect()
    }

    fn row(path: &str, source: &str, cells: &[(&str, Option<&str>)]) -> TranslationRow {
        TranslationRow {
            path: path.parse().unwrap(),
            source: source.to_string(),
            cells: cells
                .iter()
                .map(|(lang, cell)| (lang.to_string(), cell.map(str::to_string)))
                .collect(),
        }
    }

    fn merger(targets: &[&str], stale_policy: StalePolicy) -> TranslationMerger {
        TranslationMerger::new(MergeOptions {
            source: "zh-cn".to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            stale_policy,
        })
    }

    fn login_set() -> TranslationSet {
        set(json!({
            "zh-cn": {"login": {"title": "登录", "button": "提交"}},
            "en": {}
        }))
    }

    #[test]
    fn test_login_scenario() {
        let rows = vec![
            row("login.title", "登录", &[("en", Some("Login"))]),
            row("login.button", "提交", &[("en", None)]),
        ];

        let (merged, report) = merger(&["en"], StalePolicy::Ignore)
            .merge(login_set(), &rows)
            .unwrap();

        assert_eq!(
            merged.get("en").unwrap().to_json(),
            json!({"login": {"title": "Login"}})
        );
        assert_eq!(report.total_applied(), 1);
    }

    #[test]
    fn test_blank_rows_are_noop() {
        let input = set(json!({
            "zh-cn": {"a": "甲", "b": "乙"},
            "en": {"a": "A"}
        }));
        let rows = vec![
            row("a", "甲", &[("en", None)]),
            row("b", "乙", &[("en", None)]),
        ];

        let (merged, report) = merger(&["en"], StalePolicy::Ignore)
            .merge(input.clone(), &rows)
            .unwrap();
        assert_eq!(serialized(&merged), serialized(&input));
        assert_eq!(report.total_applied(), 0);
    }

    #[test]
    fn test_merge_idempotent() {
        let rows = vec![
            row("login.title", "登录", &[("en", Some("Login"))]),
            row("login.button", "提交", &[("en", Some("Submit"))]),
        ];
        let m = merger(&["en"], StalePolicy::Ignore);

        let (once, _) = m.merge(login_set(), &rows).unwrap();
        let (twice, report) = m.merge(once.clone(), &rows).unwrap();
        assert_eq!(serialized(&once), serialized(&twice));
        assert_eq!(report.total_applied(), 0);
    }

    #[test]
    fn test_merge_keeps_existing_key_order() {
        let input = set(json!({
            "zh-cn": {"z": "最后", "a": "开始", "m": "中间"},
            "en": {"z": "Last", "a": "Start"}
        }));
        let rows = vec![
            row("a", "开始", &[("en", Some("Begin"))]),
            row("m", "中间", &[("en", Some("Middle"))]),
        ];

        let (merged, _) = merger(&["en"], StalePolicy::Ignore).merge(input, &rows).unwrap();
        assert_eq!(
            serialized(&merged)[1],
            ("en".to_string(), r#"{"z":"Last","a":"Begin","m":"Middle"}"#.to_string())
        );
    }

    #[test]
    fn test_language_column_case_insensitive() {
        let rows = vec![row("login.title", "登录", &[("EN", Some("Login"))])];

        let (merged, report) = merger(&["en"], StalePolicy::Warn)
            .merge(login_set(), &rows)
            .unwrap();
        assert_eq!(merged.get("en").unwrap().to_json(), json!({"login": {"title": "Login"}}));
        assert_eq!(report.total_applied(), 1);
    }

    #[test]
    fn test_disjoint_batches_commute() {
        let r1 = vec![row("login.title", "登录", &[("en", Some("Login"))])];
        let r2 = vec![row("login.button", "提交", &[("en", Some("Submit"))])];
        let m = merger(&["en"], StalePolicy::Ignore);

        let (a, _) = m.merge(login_set(), &r1).unwrap();
        let (a, _) = m.merge(a, &r2).unwrap();
        let (b, _) = m.merge(login_set(), &r2).unwrap();
        let (b, _) = m.merge(b, &r1).unwrap();

        // 键的插入顺序可能不同，按内容比较
        let en_a = a.get("en").unwrap();
        let en_b = b.get("en").unwrap();
        assert_eq!(
            key_path::flatten(en_a).into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            key_path::flatten(en_b).into_iter().collect::<std::collections::BTreeMap<_, _>>()
        );
    }

    #[test]
    fn test_same_path_last_wins() {
        let r1 = vec![row("login.title", "登录", &[("en", Some("Login"))])];
        let r2 = vec![row("login.title", "登录", &[("en", Some("Sign in"))])];
        let m = merger(&["en"], StalePolicy::Ignore);

        let (merged, _) = m.merge(login_set(), &r1).unwrap();
        let (merged, _) = m.merge(merged, &r2).unwrap();
        assert_eq!(
            key_path::resolve(merged.get("en").unwrap(), &"login.title".parse().unwrap()),
            Some("Sign in")
        );
    }

    #[test]
    fn test_stale_policies() {
        let rows = vec![
            row("removed.key", "旧", &[("en", Some("Old"))]),
            row("login.title", "登录", &[("en", Some("Login"))]),
        ];

        let (merged, report) = merger(&["en"], StalePolicy::Ignore)
            .merge(login_set(), &rows)
            .unwrap();
        assert_eq!(merged.get("en").unwrap().to_json(), json!({"login": {"title": "Login"}}));
        assert_eq!(report.skipped_stale, 1);
        assert!(report.stale.is_empty());

        let (_, report) = merger(&["en"], StalePolicy::Warn)
            .merge(login_set(), &rows)
            .unwrap();
        assert_eq!(report.stale.len(), 1);
        assert_eq!(report.stale[0].to_string(), "removed.key");

        let (merged, report) = merger(&["en"], StalePolicy::Apply)
            .merge(login_set(), &rows)
            .unwrap();
        assert_eq!(report.skipped_stale, 0);
        assert_eq!(
            merged.get("en").unwrap().to_json(),
            json!({"removed": {"key": "Old"}, "login": {"title": "Login"}})
        );
    }

    #[test]
    fn test_conflict_aborts_only_that_language() {
        let input = set(json!({
            "zh-cn": {"a": {"b": "甲"}},
            "en": {"a": "flat"},
            "ko": {}
        }));
        let rows = vec![row("a.b", "甲", &[("en", Some("A")), ("ko", Some("가"))])];

        let (merged, report) = merger(&["en", "ko"], StalePolicy::Ignore)
            .merge(input, &rows)
            .unwrap();

        assert_eq!(merged.get("en").unwrap().to_json(), json!({"a": "flat"}));
        assert_eq!(merged.get("ko").unwrap().to_json(), json!({"a": {"b": "가"}}));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "en");
        assert!(matches!(report.failed[0].1, LocaleError::PathConflict { .. }));
    }

    #[test]
    fn test_unlisted_language_columns_ignored() {
        let rows = vec![row("login.title", "登录", &[("en", Some("Login")), ("jp", Some("ログイン"))])];
        let (merged, _) = merger(&["en"], StalePolicy::Ignore)
            .merge(login_set(), &rows)
            .unwrap();
        assert!(!merged.contains("jp"));
    }

    #[test]
    fn test_missing_target_created_only_when_written() {
        let rows = vec![row("login.title", "登录", &[("ko", None)])];
        let (merged, _) = merger(&["ko"], StalePolicy::Ignore)
            .merge(login_set(), &rows)
            .unwrap();
        assert!(!merged.contains("ko"));

        let rows = vec![row("login.title", "登录", &[("ko", Some("로그인"))])];
        let (merged, _) = merger(&["ko"], StalePolicy::Ignore)
            .merge(login_set(), &rows)
            .unwrap();
        assert_eq!(merged.get("ko").unwrap().to_json(), json!({"login": {"title": "로그인"}}));
    }

    #[test]
    fn test_stale_policy_parse() {
        assert_eq!("WARN".parse::<StalePolicy>().unwrap(), StalePolicy::Warn);
        assert_eq!(StalePolicy::Apply.to_string(), "apply");
        assert!("drop".parse::<StalePolicy>().is_err());
    }
}
