// ==========================================
// 仓库库存登记系统 - 字段清洗
// ==========================================
// 职责: TRIM / UPPER / 序列号净化 / 数量解析 / 归属归一
// 全部为纯函数: 不失败、无副作用
// ==========================================

use crate::domain::types::AssetStatus;

/// 去除首尾空白并转大写
pub fn normalize_text(value: &str) -> String {
    value.trim().to_uppercase()
}

/// 仅保留 [A-Za-z0-9-]，再转大写
pub fn sanitize_serial(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_uppercase()
}

/// 解析数量
///
/// 取前导整数部分（"5.7" → 5，"12 pcs" → 12）；
/// 空串、无数字前缀、负数或溢出时返回 `default`
pub fn parse_quantity(value: &str, default: u32) -> u32 {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return default;
    }

    match digits.parse::<u32>() {
        Ok(0) => 0,
        Ok(_) if negative => default,
        Ok(n) => n,
        Err(_) => default,
    }
}

/// 资产归属归一（"SEWA" → Sewa，其余 → Asset）
pub fn normalize_asset_status(value: &str) -> AssetStatus {
    AssetStatus::from_raw(value)
}
