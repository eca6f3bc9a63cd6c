/// CSV 表格行读写
///
/// 表头：`key, source, <语言>...`，每个未翻译条目一行。
/// 写出时带 UTF-8 BOM，以便表格软件正确识别中文；
/// 读取时优先按 BOM 判断编码，否则使用配置的编码。
use std::path::PathBuf;

use encoding_rs::Encoding;
use indexmap::IndexMap;

use super::traits::{RowReader, RowWriter};
use crate::diff::UntranslatedEntry;
use crate::key_path::KeyPath;
use crate::merge::TranslationRow;
use crate::utils::{LocaleError, Result};

pub const KEY_HEADER: &str = "key";
pub const SOURCE_HEADER: &str = "source";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 按名称查找编码（如 "utf-8"、"gbk"）
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LocaleError::UnknownEncoding(label.to_string()))
}

/// CSV 写入器
#[derive(Debug, Clone)]
pub struct CsvRowWriter {
    path: PathBuf,
}

impl CsvRowWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowWriter for CsvRowWriter {
    fn write_rows(&self, targets: &[String], entries: &[UntranslatedEntry]) -> Result<()> {
        let mut buffer = UTF8_BOM.to_vec();
        {
            let mut wtr = csv::Writer::from_writer(&mut buffer);

            let mut header = vec![KEY_HEADER, SOURCE_HEADER];
            header.extend(targets.iter().map(String::as_str));
            wtr.write_record(&header)?;

            for entry in entries {
                let key = entry.path.to_string();
                let mut record = vec![key.as_str(), entry.source.as_str()];
                record.extend(targets.iter().map(|lang| entry.target(lang).unwrap_or("")));
                wtr.write_record(&record)?;
            }

            wtr.flush()?;
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, buffer)?;

        tracing::info!(path = %self.path.display(), rows = entries.len(), "wrote row file");
        Ok(())
    }
}

/// CSV 读取器
#[derive(Debug, Clone)]
pub struct CsvRowReader {
    path: PathBuf,
    encoding: &'static Encoding,
}

impl CsvRowReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: encoding_rs::UTF_8,
        }
    }

    /// 无 BOM 时使用的编码
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// 从已解码的文本解析行
    pub fn parse(text: &str) -> Result<Vec<TranslationRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| LocaleError::RowFormat(format!("missing '{}' column", name)))
        };
        let key_index = find(KEY_HEADER)?;
        let source_index = find(SOURCE_HEADER)?;

        let languages: Vec<(usize, &String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != key_index && *i != source_index && !h.is_empty())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let key = record.get(key_index).unwrap_or("").trim();
            if key.is_empty() {
                continue;
            }

            let path: KeyPath = key.parse()?;
            let source = record.get(source_index).unwrap_or("").to_string();
            let cells: IndexMap<String, Option<String>> = languages
                .iter()
                .map(|(i, lang)| {
                    let cell = record
                        .get(*i)
                        .filter(|value| !value.trim().is_empty())
                        .map(str::to_string);
                    ((*lang).clone(), cell)
                })
                .collect();

            rows.push(TranslationRow { path, source, cells });
        }

        Ok(rows)
    }
}

impl RowReader for CsvRowReader {
    fn read_rows(&self) -> Result<Vec<TranslationRow>> {
        let bytes = std::fs::read(&self.path)?;
        // decode 会识别并去除 BOM
        let (text, used, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            tracing::warn!(
                path = %self.path.display(),
                encoding = used.name(),
                "row file contains malformed sequences"
            );
        }

        let rows = Self::parse(&text)?;
        tracing::info!(path = %self.path.display(), rows = rows.len(), "read row file");
        Ok(rows)
    }
}
