/// 命令层
///
/// 把存储、引擎和配置串起来。每个命令都先在内存中完成全部变换，
/// 最后才一次性交给存储写出，中途失败不会留下写了一半的文件。
use crate::clean::{CleanEngine, CleanReport};
use crate::config::{CleanConfig, Config, DiffConfig, TranslateConfig};
use crate::converter::ScriptConverter;
use crate::detector::UntranslatedDetector;
use crate::diff::{DiffExtractor, DiffReport};
use crate::io::{
    encoding_for_label, CsvRowReader, CsvRowWriter, JsonTreeStore, RowReader, RowWriter, TreeStore,
};
use crate::merge::{MergeReport, TranslationMerger};
use crate::translation_set::TranslationSet;
use crate::utils::Result;

/// clean：读取原始树，清理后写入输出目录
///
/// 来源语言总会被加载（作为转换来源），但只有 `langs` 中列出的语言会被写出。
pub fn clean_translations<I, O>(config: &CleanConfig, input: &I, output: &O) -> Result<CleanReport>
where
    I: TreeStore + Sync,
    O: TreeStore + Sync,
{
    let detector = UntranslatedDetector::new(&config.pattern)?;
    let converter = ScriptConverter::simplified_to_traditional();
    let engine = CleanEngine::new(&detector, &converter);

    let raw = input.load_set(&config.languages())?;
    let (cleaned, report) = engine.clean(&raw, &config.plan())?;

    let to_save: TranslationSet = cleaned
        .into_iter()
        .filter(|(language, _)| config.langs.contains(language))
        .collect();
    output.save_set(&to_save)?;
    Ok(report)
}

/// diff：提取未翻译条目并写出表格
pub fn diff_translations<I>(config: &DiffConfig, input: &I, writer: &dyn RowWriter) -> Result<DiffReport>
where
    I: TreeStore + Sync,
{
    let detector = UntranslatedDetector::new(&config.pattern)?;
    let extractor = DiffExtractor::new(&detector);
    let options = config.options();

    let set = input.load_set(&config.languages())?;
    let report = extractor.extract(&set, &options)?;

    writer.write_rows(&options.targets, &report.entries)?;
    Ok(report)
}

/// translate：把表格中的译文合并回目标语言并写出
pub fn translate_rows<I, O>(
    config: &TranslateConfig,
    input: &I,
    reader: &dyn RowReader,
    output: &O,
) -> Result<MergeReport>
where
    I: TreeStore + Sync,
    O: TreeStore + Sync,
{
    let merger = TranslationMerger::new(config.options());

    let set = input.load_set(&config.languages())?;
    let rows = reader.read_rows()?;
    let (merged, report) = merger.merge(set, &rows)?;

    // 只写出成功合并的目标语言
    let to_save: TranslationSet = merged
        .into_iter()
        .filter(|(language, _)| report.applied.contains_key(language))
        .collect();
    output.save_set(&to_save)?;

    Ok(report)
}

/// 使用默认文件实现执行 clean
pub fn run_clean(config: &Config) -> Result<CleanReport> {
    let input = JsonTreeStore::new(&config.clean.input);
    let output = JsonTreeStore::new(&config.clean.output).with_backup(config.backup);
    clean_translations(&config.clean, &input, &output)
}

/// 使用默认文件实现执行 diff
pub fn run_diff(config: &Config) -> Result<DiffReport> {
    let input = JsonTreeStore::new(&config.diff.input);
    let writer = CsvRowWriter::new(config.diff.rows_path());
    diff_translations(&config.diff, &input, &writer)
}

/// 使用默认文件实现执行 translate
pub fn run_translate(config: &Config) -> Result<MergeReport> {
    let input = JsonTreeStore::new(&config.translate.input);
    let output = JsonTreeStore::new(&config.translate.output).with_backup(config.backup);
    let reader = CsvRowReader::new(&config.translate.rows)
        .with_encoding(encoding_for_label(&config.translate.encoding)?);
    translate_rows(&config.translate, &input, &reader, &output)
}
