// ==========================================
// 仓库库存登记系统 - API 层
// ==========================================
// 职责: 面向命令行的业务接口，统一错误类型
// ==========================================

pub mod auth_api;
pub mod error;
pub mod inventory_api;
pub mod notifications_api;

pub use auth_api::AuthApi;
pub use error::{ApiError, ApiResult};
pub use inventory_api::InventoryApi;
pub use notifications_api::NotificationsApi;
