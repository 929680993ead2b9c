// ==========================================
// 仓库库存登记系统 - 配置层
// ==========================================
// 职责: 客户端配置管理（后端地址/超时/导出目录/语言）
// 存储: 本地 config_kv 表
// ==========================================

pub mod client_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use client_config_trait::ClientConfigReader;
pub use config_manager::{config_keys, ConfigManager};
