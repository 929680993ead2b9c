// ==========================================
// 仓库库存登记系统 - 上传文件与原始行
// ==========================================

use std::collections::HashMap;
use std::path::Path;

/// 表格解码后的原始行（列名 → 原始值）
pub type RawRow = HashMap<String, String>;

/// 带来源行号的原始行
///
/// row_number 为表格中用户可见的行号（从 1 开始，表头所在行为 1），
/// 被跳过的空白行同样占用行号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub row_number: usize,
    pub values: RawRow,
}

/// 待导入的文件（内存中的原始字节）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// 从磁盘读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.xlsx".to_string());
        Ok(Self { file_name, bytes })
    }

    /// 小写扩展名（无扩展名返回空串）
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }

    /// multipart 上传使用的 MIME 类型
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_str() {
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "xls" => "application/vnd.ms-excel",
            "ods" => "application/vnd.oasis.opendocument.spreadsheet",
            "csv" => "text/csv",
            _ => "application/octet-stream",
        }
    }
}
