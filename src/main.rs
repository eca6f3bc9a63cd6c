use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use i18n_lifecycle::commands::{run_clean, run_diff, run_translate};
use i18n_lifecycle::config::{CleanOverrides, DiffOverrides, TranslateOverrides};
use i18n_lifecycle::{Config, ConfigOverrides, ConfigProvider, FileConfigProvider, StalePolicy};

#[derive(Parser)]
#[command(name = "i18n_lifecycle")]
#[command(about = "清理、导出并回写多语言 JSON 翻译文件")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// 配置文件路径（默认读取当前目录的 i18n-lifecycle.toml）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 静默模式(仅输出错误)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// 覆盖文件前创建备份
    #[arg(long, global = true)]
    backup: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 清理原始翻译文件，生成"干净"的多语言文件
    Clean(CleanArgs),
    /// 提取未翻译的内容，生成表格文件
    Diff(DiffArgs),
    /// 从表格中提取译文并写回同名 JSON 文件
    Translate(TranslateArgs),
}

/// 三个命令共用的参数
#[derive(Args)]
struct CommonArgs {
    /// 输入目录
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 语言列表（逗号分隔）
    #[arg(short, long, value_delimiter = ',')]
    langs: Option<Vec<String>>,

    /// 来源语言
    #[arg(short, long)]
    source: Option<String>,
}

#[derive(Args)]
struct CleanArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// 未翻译检测正则
    #[arg(long)]
    pattern: Option<String>,

    /// 保留未翻译的叶子
    #[arg(long)]
    no_remove: bool,

    /// 不做简转繁自动填充
    #[arg(long)]
    no_convert: bool,
}

#[derive(Args)]
struct DiffArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// 未翻译检测正则
    #[arg(long)]
    pattern: Option<String>,

    /// 所有目标语言都已有译文时跳过
    #[arg(long)]
    skip_translated: bool,
}

#[derive(Args)]
struct TranslateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// 译文表格文件
    #[arg(short, long)]
    rows: Option<PathBuf>,

    /// 过期行处理策略 (ignore, warn, apply)
    #[arg(long)]
    stale: Option<StalePolicy>,

    /// 表格文件编码（无 BOM 时使用）
    #[arg(long)]
    encoding: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let provider = match &cli.config {
        Some(path) => FileConfigProvider::new(path),
        None => FileConfigProvider::default_file(),
    };
    let config = load_config(&provider, build_overrides(&cli))?;

    match &cli.command {
        Commands::Clean(_) => handle_clean(&cli, &config),
        Commands::Diff(_) => handle_diff(&cli, &config),
        Commands::Translate(_) => handle_translate(&cli, &config),
    }
}

/// 初始化日志（RUST_LOG 优先）
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 解析配置：默认值 < 配置文件 < 命令行
fn load_config(provider: &dyn ConfigProvider, cli_overrides: ConfigOverrides) -> Result<Config> {
    Config::resolve(provider, cli_overrides).context("加载配置失败")
}

/// 命令行参数转换为配置覆盖层
fn build_overrides(cli: &Cli) -> ConfigOverrides {
    let mut overrides = ConfigOverrides {
        backup: cli.backup.then_some(true),
        ..Default::default()
    };

    match &cli.command {
        Commands::Clean(args) => {
            overrides.clean = Some(CleanOverrides {
                input: args.common.input.clone(),
                output: args.common.output.clone(),
                langs: args.common.langs.clone(),
                source: args.common.source.clone(),
                pattern: args.pattern.clone(),
                remove: args.no_remove.then_some(false),
                auto_convert: args.no_convert.then_some(false),
                ..Default::default()
            });
        }
        Commands::Diff(args) => {
            overrides.diff = Some(DiffOverrides {
                input: args.common.input.clone(),
                output: args.common.output.clone(),
                langs: args.common.langs.clone(),
                source: args.common.source.clone(),
                pattern: args.pattern.clone(),
                skip_translated: args.skip_translated.then_some(true),
                ..Default::default()
            });
        }
        Commands::Translate(args) => {
            overrides.translate = Some(TranslateOverrides {
                input: args.common.input.clone(),
                output: args.common.output.clone(),
                langs: args.common.langs.clone(),
                source: args.common.source.clone(),
                rows: args.rows.clone(),
                stale: args.stale,
                encoding: args.encoding.clone(),
            });
        }
    }

    overrides
}

/// 处理 clean 命令
fn handle_clean(cli: &Cli, config: &Config) -> Result<()> {
    tracing::info!(input = %config.clean.input.display(), "start to clean");

    let report = run_clean(config).context("清理失败")?;

    if !cli.quiet {
        print!("{}", report);
        println!("结果已写入: {:?}", config.clean.output);
    }

    if !report.failed.is_empty() {
        bail!("{} 个语言清理失败", report.failed.len());
    }
    Ok(())
}

/// 处理 diff 命令
fn handle_diff(cli: &Cli, config: &Config) -> Result<()> {
    tracing::info!(input = %config.diff.input.display(), "start to diff");

    let report = run_diff(config).context("提取未翻译内容失败")?;

    if !cli.quiet {
        println!("提取到 {} 个未翻译条目", report.entries.len());
        print_sample_entries(&report);
        if !report.mismatches.is_empty() {
            println!("结构不一致: {} 处（按缺失处理）", report.mismatches.len());
        }
        println!("结果已写入: {:?}", config.diff.rows_path());
    }

    Ok(())
}

/// 显示前3个条目
fn print_sample_entries(report: &i18n_lifecycle::DiffReport) {
    if report.entries.is_empty() {
        return;
    }

    println!("\n样例条目:");
    for (i, entry) in report.entries.iter().take(3).enumerate() {
        println!(
            "{}. {}: \"{}\"",
            i + 1,
            entry.path,
            if entry.source.chars().count() > 50 {
                format!("{}...", entry.source.chars().take(50).collect::<String>())
            } else {
                entry.source.clone()
            }
        );
    }
    if report.entries.len() > 3 {
        println!("... 还有 {} 个条目", report.entries.len() - 3);
    }
}

/// 处理 translate 命令
fn handle_translate(cli: &Cli, config: &Config) -> Result<()> {
    if !config.translate.rows.exists() {
        bail!("译文表格不存在: {:?}", config.translate.rows);
    }
    tracing::info!(rows = %config.translate.rows.display(), "start to translate");

    let report = run_translate(config).context("应用译文失败")?;

    if !cli.quiet {
        print!("{}", report);
        println!("结果已写入: {:?}", config.translate.output);
    }

    if !report.failed.is_empty() {
        bail!("{} 个语言合并失败", report.failed.len());
    }
    Ok(())
}
