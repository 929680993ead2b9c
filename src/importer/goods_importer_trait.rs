// ==========================================
// 仓库库存登记系统 - 货物导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::goods::{ImportOutcome, IncomingGoods, OutgoingGoods};
use crate::domain::types::GoodsKind;
use crate::domain::upload::{RawRow, SourceRow, UploadFile};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// GoodsImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: GoodsImporterImpl
#[async_trait]
pub trait GoodsImporter: Send + Sync {
    /// 导入表格文件
    ///
    /// # 流程
    /// 1. 上传原始文件到后端批量导入接口，成功即返回
    /// 2. 失败时回退到客户端: 解码 → 映射 → 过滤 → 逐行创建
    ///
    /// # 返回
    /// - ImportOutcome: 管道级失败也以 success=false 表达，不返回 Err
    async fn import(&self, file: &UploadFile, kind: GoodsKind) -> ImportOutcome;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格解码（仅第一个工作表，首行为表头）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件字节为原始行记录（HashMap<列名, 值> + 表格行号）
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<SourceRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始行 → 记录（带清洗与默认值）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    fn map_incoming(&self, row: &RawRow) -> IncomingGoods;

    fn map_outgoing(&self, row: &RawRow) -> OutgoingGoods;
}
