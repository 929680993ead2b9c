// ==========================================
// 仓库库存登记系统 - 驾驶舱读模型
// ==========================================
// 统计与图表数据由后端聚合，客户端只做展示
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_incoming: u64,
    pub total_outgoing: u64,
    pub total_asset: u64,
    pub total_sewa: u64,
    pub pending_items: u64,
    pub active_allocations: u64,
}

/// 月度出入库折线图数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub masuk: u64,
    pub keluar: u64,
}

/// 资产归属饼图数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipDataPoint {
    pub name: String,
    pub value: u64,
    pub color: String,
}
