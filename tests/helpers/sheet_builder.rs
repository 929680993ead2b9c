// ==========================================
// 测试用表格生成
// ==========================================

use inventaris_gudang::domain::UploadFile;
use rust_xlsxwriter::Workbook;

/// 生成单工作表 xlsx（首行为表头，全部写为字符串）
pub fn xlsx_file(file_name: &str, rows: &[&[&str]]) -> UploadFile {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    UploadFile::new(file_name, workbook.save_to_buffer().unwrap())
}

/// 生成 CSV 文件
pub fn csv_file(file_name: &str, rows: &[&[&str]]) -> UploadFile {
    let content = rows
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n");
    UploadFile::new(file_name, content.into_bytes())
}
