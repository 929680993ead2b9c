// ==========================================
// 仓库库存登记系统 - 后端网关 Trait
// ==========================================
// 职责: 定义与远端库存/驾驶舱/认证/通知服务交互的接口（不包含实现）
// 实现者: HttpGateway（生产）、测试中的内存 Mock
// ==========================================

use crate::domain::dashboard::{ChartDataPoint, DashboardStats, OwnershipDataPoint};
use crate::domain::goods::{IncomingGoods, ListQuery, OutgoingGoods, Page};
use crate::domain::notification::Notification;
use crate::domain::session::{
    AuthResponse, LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, UserProfile,
};
use crate::domain::types::GoodsKind;
use crate::domain::upload::UploadFile;
use crate::gateway::error::GatewayResult;
use async_trait::async_trait;

// ==========================================
// InventoryGateway Trait
// ==========================================
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// 上传原始文件到批量导入接口
    ///
    /// # 返回
    /// - 后端报告的导入条数
    async fn bulk_import(&self, kind: GoodsKind, file: &UploadFile) -> GatewayResult<usize>;

    /// 创建单条入库记录，返回后端保存后的记录
    async fn create_incoming(&self, record: &IncomingGoods) -> GatewayResult<IncomingGoods>;

    /// 创建单条出库记录，返回后端保存后的记录
    async fn create_outgoing(&self, record: &OutgoingGoods) -> GatewayResult<OutgoingGoods>;

    async fn list_incoming(&self, query: &ListQuery) -> GatewayResult<Page<IncomingGoods>>;

    async fn list_outgoing(&self, query: &ListQuery) -> GatewayResult<Page<OutgoingGoods>>;

    /// 下载后端预生成的合并报表（原始字节）
    async fn export_combined(&self) -> GatewayResult<Vec<u8>>;
}

// ==========================================
// DashboardGateway Trait
// ==========================================
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    async fn dashboard_stats(&self) -> GatewayResult<DashboardStats>;

    /// 最近 months 个月的出入库数量
    async fn chart_data(&self, months: u32) -> GatewayResult<Vec<ChartDataPoint>>;

    async fn ownership_data(&self) -> GatewayResult<Vec<OwnershipDataPoint>>;
}

// ==========================================
// AuthGateway Trait
// ==========================================
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthResponse>;

    async fn logout(&self) -> GatewayResult<()>;

    async fn profile(&self) -> GatewayResult<Option<UserProfile>>;

    /// 更新当前用户档案，返回后端保存后的档案
    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<UserProfile>;

    async fn update_password(&self, change: &PasswordChange) -> GatewayResult<()>;
}

// ==========================================
// NotificationGateway Trait
// ==========================================
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// 最近 limit 条通知（后端按时间倒序）
    async fn notifications(&self, limit: u32) -> GatewayResult<Vec<Notification>>;

    async fn mark_notification_read(&self, id: &str) -> GatewayResult<()>;

    async fn mark_all_notifications_read(&self) -> GatewayResult<()>;
}
