// ==========================================
// 仓库库存登记系统 - 导入层
// ==========================================
// 职责: 表格文件 → 入库/出库记录
// 支持: Excel (.xlsx/.xls/.ods), CSV
// 流程: 后端批量导入，失败时 解析 → 映射 → 过滤 → 逐行创建
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod goods_importer;
pub mod goods_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use goods_importer::{partition_importable, GoodsImporterImpl};

// 重导出 Trait 接口
pub use goods_importer_trait::{FieldMapper, FileParser, GoodsImporter};
