// ==========================================
// 仓库库存登记系统 - 领域类型定义
// ==========================================
// 职责: 货物类别、资产归属、出库状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 货物类别 (Goods Kind)
// ==========================================
// 入库 = Barang Masuk, 出库 = Barang Keluar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoodsKind {
    Incoming, // 入库
    Outgoing, // 出库
}

impl GoodsKind {
    /// 后端资源路径段
    pub fn resource_path(&self) -> &'static str {
        match self {
            GoodsKind::Incoming => "incoming-goods",
            GoodsKind::Outgoing => "outgoing-goods",
        }
    }

    /// 导出工作表名称
    pub fn sheet_name(&self) -> &'static str {
        match self {
            GoodsKind::Incoming => "Barang Masuk",
            GoodsKind::Outgoing => "Barang Keluar",
        }
    }

    /// 单类导出报表名（文件名前缀）
    pub fn report_name(&self) -> &'static str {
        match self {
            GoodsKind::Incoming => "barang_masuk",
            GoodsKind::Outgoing => "barang_keluar",
        }
    }

    /// 解析命令行/配置中的类别名称
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "incoming" | "masuk" | "in" => Some(GoodsKind::Incoming),
            "outgoing" | "keluar" | "out" => Some(GoodsKind::Outgoing),
            _ => None,
        }
    }
}

impl fmt::Display for GoodsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoodsKind::Incoming => write!(f, "incoming"),
            GoodsKind::Outgoing => write!(f, "outgoing"),
        }
    }
}

// ==========================================
// 资产归属 (Asset Status)
// ==========================================
// 二值: 除 "SEWA" 外一律视为 Asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AssetStatus {
    #[default]
    Asset, // 自有资产
    Sewa,  // 租赁
}

impl AssetStatus {
    /// TRIM + UPPER 后等于 "SEWA" 视为租赁，其余一律为 Asset
    pub fn from_raw(value: &str) -> Self {
        if value.trim().to_uppercase() == "SEWA" {
            AssetStatus::Sewa
        } else {
            AssetStatus::Asset
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Asset => "Asset",
            AssetStatus::Sewa => "Sewa",
        }
    }
}

impl From<String> for AssetStatus {
    fn from(value: String) -> Self {
        AssetStatus::from_raw(&value)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 出库状态 (Outgoing Status)
// ==========================================
// 记录本身保存原始字符串（不做枚举校验），此类型仅用于识别与统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutgoingStatus {
    Alokasi, // 已分配
    Pinjam,  // 借出
    Rusak,   // 损坏
    Hilang,  // 丢失
}

impl OutgoingStatus {
    pub const ALL: [OutgoingStatus; 4] = [
        OutgoingStatus::Alokasi,
        OutgoingStatus::Pinjam,
        OutgoingStatus::Rusak,
        OutgoingStatus::Hilang,
    ];

    /// 大小写不敏感地识别已知状态
    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().to_uppercase() == upper)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutgoingStatus::Alokasi => "Alokasi",
            OutgoingStatus::Pinjam => "Pinjam",
            OutgoingStatus::Rusak => "Rusak",
            OutgoingStatus::Hilang => "Hilang",
        }
    }
}

impl fmt::Display for OutgoingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_status_coercion() {
        assert_eq!(AssetStatus::from_raw("sewa"), AssetStatus::Sewa);
        assert_eq!(AssetStatus::from_raw(" Sewa "), AssetStatus::Sewa);
        assert_eq!(AssetStatus::from_raw("SEWA"), AssetStatus::Sewa);
        assert_eq!(AssetStatus::from_raw(""), AssetStatus::Asset);
        assert_eq!(AssetStatus::from_raw("rental"), AssetStatus::Asset);
        assert_eq!(AssetStatus::from_raw("asset"), AssetStatus::Asset);
    }

    #[test]
    fn test_asset_status_serde() {
        let json = serde_json::to_string(&AssetStatus::Sewa).unwrap();
        assert_eq!(json, "\"Sewa\"");

        // 后端返回未知值时同样按二值规则归一
        let parsed: AssetStatus = serde_json::from_str("\"milik sendiri\"").unwrap();
        assert_eq!(parsed, AssetStatus::Asset);
        let parsed: AssetStatus = serde_json::from_str("\"sewa\"").unwrap();
        assert_eq!(parsed, AssetStatus::Sewa);
    }

    #[test]
    fn test_outgoing_status_parse() {
        assert_eq!(OutgoingStatus::parse("ALOKASI"), Some(OutgoingStatus::Alokasi));
        assert_eq!(OutgoingStatus::parse(" pinjam "), Some(OutgoingStatus::Pinjam));
        assert_eq!(OutgoingStatus::parse("Dipinjamkan"), None);
    }

    #[test]
    fn test_goods_kind_paths() {
        assert_eq!(GoodsKind::Incoming.resource_path(), "incoming-goods");
        assert_eq!(GoodsKind::Outgoing.sheet_name(), "Barang Keluar");
        assert_eq!(GoodsKind::parse("Keluar"), Some(GoodsKind::Outgoing));
        assert_eq!(GoodsKind::parse("stock"), None);
    }
}
