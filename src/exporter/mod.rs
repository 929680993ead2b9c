// ==========================================
// 仓库库存登记系统 - 导出层
// ==========================================
// 职责: 入库/出库/合并报表生成与保存
// 格式: .xlsx（rust_xlsxwriter）
// ==========================================

pub mod error;
pub mod report_exporter;
pub mod xlsx_writer;

pub use error::{ExportError, ExportResult};
pub use report_exporter::{ExportArtifact, ExportSource, ReportExporter};
pub use xlsx_writer::{
    build_combined_workbook, build_goods_workbook, report_file_name, COMBINED_REPORT_NAME,
};
