// ==========================================
// 仓库库存登记系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件字节 → 原始行
// 支持: Excel (.xlsx/.xls/.ods) / CSV (.csv)
// 约定: 仅读取第一个工作表，首行为表头；表头 TRIM，单元格值原样保留
//       每行携带表格中可见的行号（空白行跳过但仍占行号）
// ==========================================

use crate::domain::upload::{RawRow, SourceRow, UploadFile};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::goods_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;

/// 单元格转字符串（日期单元格输出 YYYY-MM-DD）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::DateTime(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => cell.to_string(),
    }
}

/// 由表头与一行数据组装原始行；完全空白的行返回 None
fn build_row<I>(headers: &[String], row_number: usize, values: I) -> Option<SourceRow>
where
    I: Iterator<Item = String>,
{
    let mut row_map = RawRow::new();
    for (col_idx, value) in values.enumerate() {
        match headers.get(col_idx) {
            Some(header) if !header.is_empty() => {
                row_map.insert(header.clone(), value);
            }
            _ => {}
        }
    }

    // 跳过完全空白的行
    if row_map.values().all(|v| v.trim().is_empty()) {
        return None;
    }
    Some(SourceRow {
        row_number,
        values: row_map,
    })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<SourceRow>> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::CsvParseError("CSV 文件无表头".to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        // 行号取记录起始行（表头为第 1 行；引号内换行不影响后续行号）
        for result in reader.records() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);
            if let Some(row) = build_row(&headers, row_number, record.iter().map(str::to_string)) {
                rows.push(row);
            }
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<SourceRow>> {
        // 自动识别 xlsx/xls/xlsb/ods，不可识别的字节在此失败
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 已用区域可能不从 A1 开始，行号以区域起始行为基准
        let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

        // 提取表头（第一行）
        let mut data_rows = range.rows();
        let header_row = data_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect();

        // 读取数据行
        let rows = data_rows
            .enumerate()
            .filter_map(|(idx, data_row)| {
                build_row(&headers, first_row + idx + 1, data_row.iter().map(cell_to_string))
            })
            .collect();

        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, file: &UploadFile) -> ImportResult<Vec<SourceRow>> {
        match file.extension().as_str() {
            "csv" => CsvParser.parse_to_raw_rows(&file.bytes),
            // 其余扩展名（含无扩展名）一律交给工作簿自动识别
            _ => ExcelParser.parse_to_raw_rows(&file.bytes),
        }
    }
}
