// ==========================================
// 仓库库存登记系统 - 货物批量导入器实现
// ==========================================
// 职责: 两阶段导入策略
// 阶段 1: 上传原始文件到后端批量导入接口
// 阶段 2: 阶段 1 失败时客户端回退
//         解析 → 映射 → 过滤 → 逐行创建（严格串行）
// 约定: 仅阶段 2 的失败对用户可见；结果以 ImportOutcome 返回，不抛出
//       逐行创建遇到会话过期即停止，剩余行不再发送请求
// ==========================================

use crate::domain::goods::{
    GoodsRecord, ImportOutcome, IncomingGoods, OutgoingGoods, RowFailure, RowFailureKind,
};
use crate::domain::types::GoodsKind;
use crate::domain::upload::{RawRow, SourceRow, UploadFile};
use crate::gateway::error::GatewayResult;
use crate::gateway::inventory_gateway::InventoryGateway;
use crate::i18n::t;
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::goods_importer_trait::{FieldMapper, GoodsImporter};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 单条记录落库（按类别分派到对应创建接口）
// ==========================================
#[async_trait]
trait PersistRecord: GoodsRecord + Send + Sync {
    async fn persist<G>(&self, gateway: &G) -> GatewayResult<()>
    where
        G: InventoryGateway + ?Sized;
}

#[async_trait]
impl PersistRecord for IncomingGoods {
    async fn persist<G>(&self, gateway: &G) -> GatewayResult<()>
    where
        G: InventoryGateway + ?Sized,
    {
        gateway.create_incoming(self).await.map(|_| ())
    }
}

#[async_trait]
impl PersistRecord for OutgoingGoods {
    async fn persist<G>(&self, gateway: &G) -> GatewayResult<()>
    where
        G: InventoryGateway + ?Sized,
    {
        gateway.create_outgoing(self).await.map(|_| ())
    }
}

fn row_failure<T: GoodsRecord>(
    row_number: usize,
    record: &T,
    kind: RowFailureKind,
    reason: String,
) -> RowFailure {
    RowFailure {
        row_number,
        serial_number: record.serial_number().to_string(),
        kind,
        reason,
    }
}

/// 过滤缺少必填字段的记录
///
/// # 参数
/// - records: (表格行号, 记录)，行号由解析器给出
///
/// # 返回
/// - (有效记录及其行号, 跳过的行)
pub fn partition_importable<T: GoodsRecord>(
    records: Vec<(usize, T)>,
) -> (Vec<(usize, T)>, Vec<RowFailure>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (row_number, record) in records {
        if record.is_importable() {
            valid.push((row_number, record));
        } else {
            skipped.push(row_failure(
                row_number,
                &record,
                RowFailureKind::MissingRequiredField,
                t("import.missing_required"),
            ));
        }
    }

    (valid, skipped)
}

// ==========================================
// GoodsImporterImpl - 货物批量导入器
// ==========================================
pub struct GoodsImporterImpl<G>
where
    G: InventoryGateway + ?Sized,
{
    // 远端网关（批量导入 + 单条创建）
    gateway: Arc<G>,

    // 导入组件
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
}

impl<G> GoodsImporterImpl<G>
where
    G: InventoryGateway + ?Sized,
{
    /// 创建导入器（使用默认字段映射器）
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_field_mapper(gateway, Box::new(DefaultFieldMapper))
    }

    pub fn with_field_mapper(gateway: Arc<G>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            gateway,
            file_parser: UniversalFileParser,
            field_mapper,
        }
    }

    /// 阶段 2: 客户端回退
    async fn import_on_client(
        &self,
        file: &UploadFile,
        kind: GoodsKind,
        batch_id: &str,
    ) -> ImportOutcome {
        debug!("步骤 1: 解析文件");
        let rows = match self.file_parser.parse(file) {
            Ok(rows) => rows,
            Err(e) => {
                error!(batch_id = %batch_id, error = %e, "文件解析失败");
                return ImportOutcome::failed(e.to_string(), Vec::new());
            }
        };
        info!(total_rows = rows.len(), "文件解析完成");

        debug!("步骤 2: 字段映射 + 过滤");
        match kind {
            GoodsKind::Incoming => {
                let records = self.map_rows(&rows, |row| self.field_mapper.map_incoming(row));
                self.persist_all(records, batch_id).await
            }
            GoodsKind::Outgoing => {
                let records = self.map_rows(&rows, |row| self.field_mapper.map_outgoing(row));
                self.persist_all(records, batch_id).await
            }
        }
    }

    fn map_rows<T, F>(&self, rows: &[SourceRow], map: F) -> Vec<(usize, T)>
    where
        F: Fn(&RawRow) -> T,
    {
        rows.iter()
            .map(|row| (row.row_number, map(&row.values)))
            .collect()
    }

    /// 过滤后逐行创建；单行失败不中断循环（会话过期除外）
    async fn persist_all<T: PersistRecord>(
        &self,
        records: Vec<(usize, T)>,
        batch_id: &str,
    ) -> ImportOutcome {
        let total = records.len();
        let (valid, mut failures) = partition_importable(records);
        info!(
            total = total,
            valid = valid.len(),
            skipped = failures.len(),
            "必填字段过滤完成"
        );

        if valid.is_empty() {
            warn!(batch_id = %batch_id, "无有效数据可导入");
            return ImportOutcome::failed(t("import.no_valid_data"), failures);
        }

        debug!("步骤 3: 逐行创建");
        let mut count = 0;
        let mut pending = valid.into_iter();
        while let Some((row_number, record)) = pending.next() {
            match record.persist(self.gateway.as_ref()).await {
                Ok(()) => count += 1,
                Err(e) => {
                    warn!(
                        row_number = row_number,
                        serial_number = %record.serial_number(),
                        error = %e,
                        "单行创建失败"
                    );
                    let auth_expired = e.is_auth_expired();
                    failures.push(row_failure(
                        row_number,
                        &record,
                        RowFailureKind::PersistenceFailed,
                        e.to_string(),
                    ));

                    if auth_expired {
                        warn!(
                            batch_id = %batch_id,
                            remaining = pending.len(),
                            "会话已过期，停止逐行创建"
                        );
                        let reason = t("auth.expired");
                        failures.extend(pending.by_ref().map(|(row_number, record)| {
                            row_failure(
                                row_number,
                                &record,
                                RowFailureKind::PersistenceFailed,
                                reason.clone(),
                            )
                        }));
                        break;
                    }
                }
            }
        }

        failures.sort_by_key(|f| f.row_number);
        ImportOutcome::from_client(count, failures)
    }
}

#[async_trait]
impl<G> GoodsImporter for GoodsImporterImpl<G>
where
    G: InventoryGateway + ?Sized,
{
    #[instrument(skip(self, file), fields(kind = %kind, file_name = %file.file_name, batch_id))]
    async fn import(&self, file: &UploadFile, kind: GoodsKind) -> ImportOutcome {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, size_bytes = file.bytes.len(), "开始导入货物数据");

        // 阶段 1: 后端批量导入
        match self.gateway.bulk_import(kind, file).await {
            Ok(count) => {
                info!(
                    count = count,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "后端批量导入成功"
                );
                return ImportOutcome::from_server(count);
            }
            Err(e) => {
                warn!(error = %e, "后端批量导入失败，回退到客户端导入");
            }
        }

        // 阶段 2: 客户端回退
        let outcome = self.import_on_client(file, kind, &batch_id).await;
        info!(
            success = outcome.success,
            count = outcome.count,
            failures = outcome.failures.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "客户端导入完成"
        );
        outcome
    }
}
