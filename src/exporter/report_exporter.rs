// ==========================================
// 仓库库存登记系统 - 报表导出器
// ==========================================
// 职责: 生成报表并写入下载目录
// - 单类导出: 同步，直接由给定记录生成
// - 合并导出: 优先下载后端预生成文件（原样写出）；
//             失败时以大页尺寸拉取两类列表，本地生成两个工作表
// ==========================================

use crate::domain::goods::{GoodsRecord, IncomingGoods, ListQuery, OutgoingGoods};
use crate::exporter::error::ExportResult;
use crate::exporter::xlsx_writer::{
    build_combined_workbook, build_goods_workbook, report_file_name, COMBINED_REPORT_NAME,
};
use crate::gateway::inventory_gateway::InventoryGateway;
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 报表来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportSource {
    Server, // 后端预生成
    Client, // 本地生成
}

/// 已写出的报表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub source: ExportSource,
    pub size_bytes: u64,
}

// ==========================================
// ReportExporter
// ==========================================
pub struct ReportExporter<G>
where
    G: InventoryGateway + ?Sized,
{
    gateway: Arc<G>,
    export_dir: PathBuf,
    // 合并导出回退时的列表页尺寸（近似“全部”）
    page_limit: u32,
}

impl<G> ReportExporter<G>
where
    G: InventoryGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, export_dir: PathBuf, page_limit: u32) -> Self {
        Self {
            gateway,
            export_dir,
            page_limit,
        }
    }

    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }

    /// 导出入库记录（barang_masuk_<日期>.xlsx）
    pub fn export_incoming(&self, records: &[IncomingGoods]) -> ExportResult<ExportArtifact> {
        self.export_records(records)
    }

    /// 导出出库记录（barang_keluar_<日期>.xlsx）
    pub fn export_outgoing(&self, records: &[OutgoingGoods]) -> ExportResult<ExportArtifact> {
        self.export_records(records)
    }

    fn export_records<T: GoodsRecord>(&self, records: &[T]) -> ExportResult<ExportArtifact> {
        let bytes = build_goods_workbook(records)?;
        let file_name = report_file_name(T::KIND.report_name(), Utc::now().date_naive());
        let artifact = self.write_artifact(file_name, &bytes, ExportSource::Client)?;
        info!(
            kind = %T::KIND,
            rows = records.len(),
            path = %artifact.path.display(),
            "报表导出完成"
        );
        Ok(artifact)
    }

    /// 合并导出（laporan_inventaris_<日期>.xlsx）
    ///
    /// # 返回
    /// - Err: 仅当本地回退也失败时
    #[instrument(skip(self))]
    pub async fn export_combined(&self) -> ExportResult<ExportArtifact> {
        let file_name = report_file_name(COMBINED_REPORT_NAME, Utc::now().date_naive());

        match self.gateway.export_combined().await {
            Ok(bytes) => {
                let artifact = self.write_artifact(file_name, &bytes, ExportSource::Server)?;
                info!(path = %artifact.path.display(), "后端合并报表已下载");
                return Ok(artifact);
            }
            Err(e) => {
                warn!(error = %e, "后端合并导出失败，回退到本地生成");
            }
        }

        let query = ListQuery::all(self.page_limit);
        let incoming = self.gateway.list_incoming(&query).await?;
        let outgoing = self.gateway.list_outgoing(&query).await?;

        let bytes = build_combined_workbook(&incoming.data, &outgoing.data)?;
        let artifact = self.write_artifact(file_name, &bytes, ExportSource::Client)?;
        info!(
            incoming = incoming.data.len(),
            outgoing = outgoing.data.len(),
            path = %artifact.path.display(),
            "本地合并报表生成完成"
        );
        Ok(artifact)
    }

    fn write_artifact(
        &self,
        file_name: String,
        bytes: &[u8],
        source: ExportSource,
    ) -> ExportResult<ExportArtifact> {
        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(&file_name);
        std::fs::write(&path, bytes)?;

        Ok(ExportArtifact {
            file_name,
            path,
            source,
            size_bytes: bytes.len() as u64,
        })
    }
}
