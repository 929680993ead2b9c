// ==========================================
// 仓库库存登记系统 - 后端网关层
// ==========================================
// 职责: 远端库存/驾驶舱/认证/通知 REST 服务访问
// 红线: 网关不做字段清洗与校验（由导入层负责）
// ==========================================

pub mod error;
pub mod http_client;
pub mod inventory_gateway;

pub use error::{GatewayError, GatewayResult};
pub use http_client::HttpGateway;
pub use inventory_gateway::{
    AuthGateway, DashboardGateway, InventoryGateway, NotificationGateway,
};
