// ==========================================
// 仓库库存登记系统 - 库存 API
// ==========================================
// 职责: 导入、单条新增、列表查询、驾驶舱统计、报表导出
// 架构: API 层 → 导入器/导出器 → 网关
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::dashboard::{ChartDataPoint, DashboardStats, OwnershipDataPoint};
use crate::domain::goods::{
    GoodsRecord, ImportOutcome, IncomingGoods, ListQuery, OutgoingGoods, Page,
};
use crate::domain::types::GoodsKind;
use crate::domain::upload::{RawRow, UploadFile};
use crate::exporter::report_exporter::{ExportArtifact, ReportExporter};
use crate::gateway::inventory_gateway::{DashboardGateway, InventoryGateway};
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::importer::goods_importer::GoodsImporterImpl;
use crate::importer::goods_importer_trait::{FieldMapper, GoodsImporter};
use crate::importer::FieldMapperImpl;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// 驾驶舱图表默认月份数
pub const DEFAULT_CHART_MONTHS: u32 = 6;

// ==========================================
// InventoryApi - 库存 API
// ==========================================
pub struct InventoryApi {
    gateway: Arc<dyn InventoryGateway>,
    dashboard: Arc<dyn DashboardGateway>,
    importer: GoodsImporterImpl<dyn InventoryGateway>,
    exporter: ReportExporter<dyn InventoryGateway>,
    field_mapper: FieldMapperImpl,
    // 单类导出时拉取列表的页尺寸
    export_page_limit: u32,
}

impl InventoryApi {
    /// 创建新的 InventoryApi 实例
    ///
    /// # 参数
    /// - gateway: 库存网关（导入/创建/列表/合并导出）
    /// - dashboard: 驾驶舱网关
    /// - exporter: 报表导出器（与 gateway 共用同一网关）
    /// - export_page_limit: 导出时的列表页尺寸
    pub fn new(
        gateway: Arc<dyn InventoryGateway>,
        dashboard: Arc<dyn DashboardGateway>,
        exporter: ReportExporter<dyn InventoryGateway>,
        export_page_limit: u32,
    ) -> Self {
        Self {
            importer: GoodsImporterImpl::new(gateway.clone()),
            gateway,
            dashboard,
            exporter,
            field_mapper: FieldMapperImpl,
            export_page_limit,
        }
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入表格文件（管道级失败以 success=false 表达）
    pub async fn import_goods(&self, file: &UploadFile, kind: GoodsKind) -> ImportOutcome {
        self.importer.import(file, kind).await
    }

    /// 从磁盘路径导入
    ///
    /// # 返回
    /// - Err(ApiError::ImportError): 文件不存在或不可读
    pub async fn import_goods_from_path(
        &self,
        path: &Path,
        kind: GoodsKind,
    ) -> ApiResult<ImportOutcome> {
        let file = UploadFile::from_path(path)
            .map_err(ImportError::from)
            .map_err(|e| match e {
                ImportError::FileNotFound(_) => ApiError::ImportError(t_with_args(
                    "import.file_not_found",
                    &[("path", &path.display().to_string())],
                )),
                other => ApiError::from(other),
            })?;

        Ok(self.import_goods(&file, kind).await)
    }

    // ==========================================
    // 单条新增（与批量导入相同的清洗规则）
    // ==========================================

    #[instrument(skip(self, row))]
    pub async fn add_incoming_item(&self, row: &RawRow) -> ApiResult<IncomingGoods> {
        let record = self.field_mapper.map_incoming(row);
        ensure_importable(&record)?;

        let created = self.gateway.create_incoming(&record).await?;
        info!(serial_number = %created.serial_number, "入库记录已创建");
        Ok(created)
    }

    #[instrument(skip(self, row))]
    pub async fn add_outgoing_item(&self, row: &RawRow) -> ApiResult<OutgoingGoods> {
        let record = self.field_mapper.map_outgoing(row);
        ensure_importable(&record)?;

        let created = self.gateway.create_outgoing(&record).await?;
        info!(serial_number = %created.serial_number, "出库记录已创建");
        Ok(created)
    }

    // ==========================================
    // 列表查询
    // ==========================================

    pub async fn list_incoming(&self, query: &ListQuery) -> ApiResult<Page<IncomingGoods>> {
        validate_query(query)?;
        Ok(self.gateway.list_incoming(query).await?)
    }

    pub async fn list_outgoing(&self, query: &ListQuery) -> ApiResult<Page<OutgoingGoods>> {
        validate_query(query)?;
        Ok(self.gateway.list_outgoing(query).await?)
    }

    // ==========================================
    // 驾驶舱
    // ==========================================

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        Ok(self.dashboard.dashboard_stats().await?)
    }

    pub async fn chart_data(&self, months: u32) -> ApiResult<Vec<ChartDataPoint>> {
        if months == 0 {
            return Err(ApiError::InvalidInput("months 必须大于 0".to_string()));
        }
        Ok(self.dashboard.chart_data(months).await?)
    }

    pub async fn ownership_data(&self) -> ApiResult<Vec<OwnershipDataPoint>> {
        Ok(self.dashboard.ownership_data().await?)
    }

    // ==========================================
    // 报表导出
    // ==========================================

    /// 导出单类报表（拉取全部记录后本地生成）
    pub async fn export_goods(&self, kind: GoodsKind) -> ApiResult<ExportArtifact> {
        let query = ListQuery::all(self.export_page_limit);
        let artifact = match kind {
            GoodsKind::Incoming => {
                let page = self.gateway.list_incoming(&query).await?;
                self.exporter.export_incoming(&page.data)?
            }
            GoodsKind::Outgoing => {
                let page = self.gateway.list_outgoing(&query).await?;
                self.exporter.export_outgoing(&page.data)?
            }
        };
        Ok(artifact)
    }

    /// 合并报表（后端优先，失败时本地生成）
    pub async fn export_combined(&self) -> ApiResult<ExportArtifact> {
        Ok(self.exporter.export_combined().await?)
    }
}

/// 必填字段校验（serial_number 与 item_name 规范化后非空）
fn ensure_importable<T: GoodsRecord>(record: &T) -> ApiResult<()> {
    if record.is_importable() {
        Ok(())
    } else {
        Err(ApiError::ValidationError(t("import.missing_required")))
    }
}

fn validate_query(query: &ListQuery) -> ApiResult<()> {
    if query.page == 0 {
        return Err(ApiError::InvalidInput("page 从 1 开始".to_string()));
    }
    if query.limit == 0 {
        return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
    }
    Ok(())
}
