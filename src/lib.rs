// ==========================================
// 仓库库存登记系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（本地配置/会话）+ REST 后端
// 系统定位: 薄客户端，业务数据由远端服务持久化与聚合
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "id");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 本地仓储层 - 会话数据访问
pub mod repository;

// 导入层 - 表格文件
pub mod importer;

// 导出层 - 报表
pub mod exporter;

// 网关层 - 远端服务
pub mod gateway;

// 配置层 - 客户端配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 实例组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssetStatus, GoodsKind, OutgoingStatus};

// 领域实体
pub use domain::{
    ImportOutcome, ImportSource, IncomingGoods, OutgoingGoods, RowFailure, RowFailureKind,
    Session, UploadFile,
};

// API
pub use api::{ApiError, AuthApi, InventoryApi, NotificationsApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Inventaris Gudang";
