//! 词表批量交换：CSV 导入/导出。
//!
//! 表头列按名字（大小写不敏感、含历史别名、顺序无关）匹配而不是按
//! 位置；分隔符逐文件自动探测（表头里分号多于逗号则按分号解析）。
//! 导出在文件头加 BOM，方便电子表格工具识别编码。

use std::collections::HashSet;

use thiserror::Error;

use crate::store::migrate::{NATIVE_ALIASES, TARGET_ALIASES};
use crate::store::operations::entries::Entry;
use crate::store::{Store, StoreError};
use crate::validation::pair_key;

const BOM: &str = "\u{FEFF}";
const HARD_COLUMN: &str = "hard";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("import file is empty")]
    EmptyFile,
    #[error("import header must contain Native and Target columns")]
    BadHeader,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("read failure: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 一行待导入的词对（id/权重/计数不随文件走）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRow {
    pub native: String,
    pub target: String,
    pub hard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// 跳过已存在的词对，其余插到表头
    Merge,
    /// 丢弃现有词表，只保留导入集（批内先去重）
    Replace,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub added: usize,
    pub skipped: usize,
}

/// 导出整个词表为带 BOM 的 CSV 文本（RFC4180 引号规则由 csv crate 保证）
pub fn export_csv(entries: &[Entry]) -> Result<String, TransferError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Native", "Target", "Hard"])?;
    for entry in entries {
        writer.write_record([
            entry.native.as_str(),
            entry.target.as_str(),
            if entry.hard { "1" } else { "" },
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| {
        TransferError::Read(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;
    let body = String::from_utf8(bytes).map_err(|e| {
        TransferError::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    Ok(format!("{BOM}{body}"))
}

fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        for (index, name) in headers.iter().enumerate() {
            if name.trim().eq_ignore_ascii_case(alias) {
                return Some(index);
            }
        }
    }
    None
}

/// 解析 CSV 文本为词对行。空文件与缺列是明确的失败原因，不会被
/// 静默吞掉；两侧文本为空的行跳过。
pub fn parse_csv(text: &str) -> Result<Vec<PairRow>, TransferError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Err(TransferError::EmptyFile);
    }

    let header_line = text.lines().next().unwrap_or_default();
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let native_idx = find_column(&headers, NATIVE_ALIASES);
    let target_idx = find_column(&headers, TARGET_ALIASES);
    let (Some(native_idx), Some(target_idx)) = (native_idx, target_idx) else {
        return Err(TransferError::BadHeader);
    };
    let hard_idx = find_column(&headers, &[HARD_COLUMN]);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let native = record.get(native_idx).unwrap_or_default().trim();
        let target = record.get(target_idx).unwrap_or_default().trim();
        if native.is_empty() || target.is_empty() {
            continue;
        }
        let hard = hard_idx
            .and_then(|i| record.get(i))
            .map(|v| v.trim() == "1")
            .unwrap_or(false);
        rows.push(PairRow {
            native: native.to_string(),
            target: target.to_string(),
            hard,
        });
    }
    Ok(rows)
}

/// 将解析好的行落库。两种模式都是先算好完整结果再整表一次写入，
/// 失败不会留下半套词表。
pub fn apply_import(
    store: &Store,
    rows: &[PairRow],
    mode: ImportMode,
) -> Result<ImportStats, TransferError> {
    let existing = match mode {
        ImportMode::Merge => store.load_entries()?,
        ImportMode::Replace => Vec::new(),
    };

    let mut seen: HashSet<String> = existing.iter().map(|e| e.dedup_key()).collect();
    let mut incoming: Vec<Entry> = Vec::new();
    let mut stats = ImportStats::default();

    for row in rows {
        let key = pair_key(&row.native, &row.target);
        if !seen.insert(key) {
            stats.skipped += 1;
            continue;
        }
        incoming.push(Entry::new(row.native.clone(), row.target.clone(), row.hard));
        stats.added += 1;
    }

    // 导入的行排在现有词条前面（与 add_entry 的最新优先一致）
    incoming.extend(existing);
    store.save_entries(&incoming)?;

    tracing::info!(
        added = stats.added,
        skipped = stats.skipped,
        mode = ?mode,
        "Applied CSV import"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> Store {
        Store::open(dir.path().join("db").to_str().unwrap()).unwrap()
    }

    #[test]
    fn export_has_bom_header_and_hard_marks() {
        let entries = vec![
            Entry::new("дом", "ev", true),
            Entry::new("кот", "kedi", false),
        ];
        let csv_text = export_csv(&entries).unwrap();

        assert!(csv_text.starts_with(BOM));
        let mut lines = csv_text.trim_start_matches(BOM).lines();
        assert_eq!(lines.next(), Some("Native,Target,Hard"));
        assert_eq!(lines.next(), Some("дом,ev,1"));
        assert_eq!(lines.next(), Some("кот,kedi,"));
    }

    #[test]
    fn export_quotes_fields_containing_delimiters() {
        let entries = vec![Entry::new("a,b", "say \"hi\"", false)];
        let csv_text = export_csv(&entries).unwrap();
        assert!(csv_text.contains("\"a,b\""));
        assert!(csv_text.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn parse_accepts_swapped_legacy_headers_by_name() {
        let rows = parse_csv("Tr,Ru,Hard\nev,дом,1\nkedi,кот,\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].native, "дом");
        assert_eq!(rows[0].target, "ev");
        assert!(rows[0].hard);
        assert!(!rows[1].hard);
    }

    #[test]
    fn parse_detects_semicolon_delimiter() {
        let rows = parse_csv("Native;Target;Hard\nдом;ev;1\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target, "ev");
        assert!(rows[0].hard);
    }

    #[test]
    fn parse_ignores_extra_columns_and_blank_rows() {
        let rows = parse_csv("Note,Native,Target\nx,дом,ev\ny,, \n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].native, "дом");
        assert!(!rows[0].hard);
    }

    #[test]
    fn parse_strips_bom() {
        let rows = parse_csv("\u{FEFF}Native,Target\nдом,ev\n").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn empty_file_and_bad_header_are_distinct_failures() {
        assert!(matches!(parse_csv("  \n"), Err(TransferError::EmptyFile)));
        assert!(matches!(
            parse_csv("Native,Hard\nдом,1\n"),
            Err(TransferError::BadHeader)
        ));
        assert!(matches!(
            parse_csv("Foo,Bar\na,b\n"),
            Err(TransferError::BadHeader)
        ));
    }

    #[test]
    fn merge_skips_existing_pairs() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        store.add_entry("дом", "ev", false).unwrap();

        let rows = vec![
            PairRow {
                native: "Дом".to_string(),
                target: "EV".to_string(),
                hard: true,
            },
            PairRow {
                native: "кот".to_string(),
                target: "kedi".to_string(),
                hard: false,
            },
        ];
        let stats = apply_import(&store, &rows, ImportMode::Merge).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(stats.skipped, 1);

        let entries = store.load_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].native, "кот");
    }

    #[test]
    fn replace_discards_existing_and_dedups_batch() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        store.add_entry("старый", "eski", false).unwrap();

        let rows = vec![
            PairRow {
                native: "дом".to_string(),
                target: "ev".to_string(),
                hard: false,
            },
            PairRow {
                native: "ДОМ".to_string(),
                target: "Ev".to_string(),
                hard: true,
            },
        ];
        let stats = apply_import(&store, &rows, ImportMode::Replace).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(stats.skipped, 1);

        let entries = store.load_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].native, "дом");
    }
}
