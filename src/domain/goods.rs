// ==========================================
// 仓库库存登记系统 - 入库/出库记录
// ==========================================
// 职责: 两类扁平记录结构 + 导入结果 + 分页结构
// 红线: 记录创建后客户端不再修改（编辑/删除由后端负责）
// ==========================================

use crate::domain::types::{AssetStatus, GoodsKind, OutgoingStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 导出单元格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    fn text(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }

    fn optional(value: &Option<String>) -> Self {
        match value {
            Some(v) => CellValue::Text(v.clone()),
            None => CellValue::Empty,
        }
    }
}

// ==========================================
// GoodsRecord Trait
// ==========================================
// 用途: 导入管道与导出管道对两类记录的统一视图
pub trait GoodsRecord {
    /// 记录类别
    const KIND: GoodsKind;

    /// 导出列名（与字段名一致，顺序固定）
    fn columns() -> &'static [&'static str];

    /// 按 columns() 顺序输出单元格
    fn cells(&self) -> Vec<CellValue>;

    fn serial_number(&self) -> &str;

    fn item_name(&self) -> &str;

    /// 必填校验: 规范化后 serial_number 与 item_name 均非空
    fn is_importable(&self) -> bool {
        !self.serial_number().is_empty() && !self.item_name().is_empty()
    }
}

// ==========================================
// IncomingGoods - 入库记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingGoods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    // 合同与交货
    pub contract_date: Option<String>,
    pub contract_no: String,
    pub delivery_no: String,
    pub do_date: Option<String>,
    pub sppb: String,

    // 数量
    pub quantity: u32,
    pub unit: String,

    // 物品
    pub serial_number: String,
    pub item_name: String,
    pub item_type: String,
    pub part_number: String,
    pub material_id: String,
    pub material_group: String,
    pub category: String,
    pub vendor: String,
    pub region: String,

    // 归属
    pub asset_status: AssetStatus,
    pub lease_end_date: Option<String>,
    pub inspection_date: Option<String>,

    // 自由文本（不做 TRIM）
    pub remarks: String,
    pub description: String,
}

const INCOMING_COLUMNS: [&str; 22] = [
    "id",
    "contract_date",
    "contract_no",
    "delivery_no",
    "do_date",
    "quantity",
    "remarks",
    "region",
    "sppb",
    "serial_number",
    "item_name",
    "item_type",
    "unit",
    "part_number",
    "material_id",
    "material_group",
    "description",
    "inspection_date",
    "asset_status",
    "lease_end_date",
    "category",
    "vendor",
];

impl GoodsRecord for IncomingGoods {
    const KIND: GoodsKind = GoodsKind::Incoming;

    fn columns() -> &'static [&'static str] {
        &INCOMING_COLUMNS
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::optional(&self.id),
            CellValue::optional(&self.contract_date),
            CellValue::text(&self.contract_no),
            CellValue::text(&self.delivery_no),
            CellValue::optional(&self.do_date),
            CellValue::Number(f64::from(self.quantity)),
            CellValue::text(&self.remarks),
            CellValue::text(&self.region),
            CellValue::text(&self.sppb),
            CellValue::text(&self.serial_number),
            CellValue::text(&self.item_name),
            CellValue::text(&self.item_type),
            CellValue::text(&self.unit),
            CellValue::text(&self.part_number),
            CellValue::text(&self.material_id),
            CellValue::text(&self.material_group),
            CellValue::text(&self.description),
            CellValue::optional(&self.inspection_date),
            CellValue::text(self.asset_status.as_str()),
            CellValue::optional(&self.lease_end_date),
            CellValue::text(&self.category),
            CellValue::text(&self.vendor),
        ]
    }

    fn serial_number(&self) -> &str {
        &self.serial_number
    }

    fn item_name(&self) -> &str {
        &self.item_name
    }
}

// ==========================================
// OutgoingGoods - 出库记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingGoods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    // 申请
    pub request_date: Option<String>,
    pub request_no: String,
    pub function_div: String,

    // 申请人
    pub employee_id: String,
    pub employee_name: String,
    pub division: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub work_location: String,
    pub technician_name: String,

    // 调拨
    pub origin_region: String,
    pub allocation_region: String,

    // 物品
    pub serial_number: String,
    pub item_name: String,
    pub quantity: u32,
    pub unit: String,

    // 状态（原样保存，不做枚举校验）
    pub status: String,
    pub return_date: Option<String>,

    pub remarks: String,
}

const OUTGOING_COLUMNS: [&str; 21] = [
    "id",
    "request_date",
    "request_no",
    "function_div",
    "employee_id",
    "employee_name",
    "division",
    "phone",
    "email",
    "position",
    "work_location",
    "remarks",
    "technician_name",
    "origin_region",
    "allocation_region",
    "serial_number",
    "item_name",
    "quantity",
    "unit",
    "status",
    "return_date",
];

impl OutgoingGoods {
    /// 识别已知出库状态（未知状态返回 None）
    pub fn status_kind(&self) -> Option<OutgoingStatus> {
        OutgoingStatus::parse(&self.status)
    }
}

impl GoodsRecord for OutgoingGoods {
    const KIND: GoodsKind = GoodsKind::Outgoing;

    fn columns() -> &'static [&'static str] {
        &OUTGOING_COLUMNS
    }

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::optional(&self.id),
            CellValue::optional(&self.request_date),
            CellValue::text(&self.request_no),
            CellValue::text(&self.function_div),
            CellValue::text(&self.employee_id),
            CellValue::text(&self.employee_name),
            CellValue::text(&self.division),
            CellValue::text(&self.phone),
            CellValue::text(&self.email),
            CellValue::text(&self.position),
            CellValue::text(&self.work_location),
            CellValue::text(&self.remarks),
            CellValue::text(&self.technician_name),
            CellValue::text(&self.origin_region),
            CellValue::text(&self.allocation_region),
            CellValue::text(&self.serial_number),
            CellValue::text(&self.item_name),
            CellValue::Number(f64::from(self.quantity)),
            CellValue::text(&self.unit),
            CellValue::text(&self.status),
            CellValue::optional(&self.return_date),
        ]
    }

    fn serial_number(&self) -> &str {
        &self.serial_number
    }

    fn item_name(&self) -> &str {
        &self.item_name
    }
}

// ==========================================
// 导入结果
// ==========================================

/// 导入数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportSource {
    Server, // 后端批量导入接口
    Client, // 客户端逐行回退
    None,   // 未产生任何导入
}

/// 行级失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowFailureKind {
    MissingRequiredField, // 校验跳过
    PersistenceFailed,    // 逐行创建失败
}

impl fmt::Display for RowFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFailureKind::MissingRequiredField => write!(f, "MISSING_REQUIRED_FIELD"),
            RowFailureKind::PersistenceFailed => write!(f, "PERSISTENCE_FAILED"),
        }
    }
}

/// 行级失败明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub serial_number: String,
    pub kind: RowFailureKind,
    pub reason: String,
}

/// 导入结果（管道级失败不抛出，调用方依据 success 分支）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub source: ImportSource,
    pub failures: Vec<RowFailure>,
}

impl ImportOutcome {
    pub fn from_server(count: usize) -> Self {
        Self {
            success: true,
            count,
            error: None,
            source: ImportSource::Server,
            failures: Vec::new(),
        }
    }

    pub fn from_client(count: usize, failures: Vec<RowFailure>) -> Self {
        Self {
            success: true,
            count,
            error: None,
            source: ImportSource::Client,
            failures,
        }
    }

    pub fn failed(error: String, failures: Vec<RowFailure>) -> Self {
        Self {
            success: false,
            count: 0,
            error: Some(error),
            source: ImportSource::None,
            failures,
        }
    }
}

// ==========================================
// 列表查询与分页
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

impl ListQuery {
    /// 近似“全部”的大页查询（导出回退使用）
    pub fn all(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}
