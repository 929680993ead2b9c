// ==========================================
// 集成测试公共辅助
// ==========================================

#![allow(dead_code)]

pub mod mock_gateway;
pub mod sheet_builder;
