// ==========================================
// 仓库库存登记系统 - 领域模型层
// ==========================================
// 职责: 定义记录结构、类型、会话与读模型
// 红线: 不含网络访问逻辑,不含存储逻辑
// ==========================================

pub mod dashboard;
pub mod goods;
pub mod notification;
pub mod session;
pub mod types;
pub mod upload;

// 重导出核心类型
pub use dashboard::{ChartDataPoint, DashboardStats, OwnershipDataPoint};
pub use goods::{
    CellValue, GoodsRecord, ImportOutcome, ImportSource, IncomingGoods, ListQuery, OutgoingGoods,
    Page, RowFailure, RowFailureKind,
};
pub use notification::Notification;
pub use session::{
    AppRole, AuthResponse, AuthUser, LoginRequest, PasswordChange, ProfileUpdate,
    RegisterRequest, Session, StoredUser, UserProfile,
};
pub use types::{AssetStatus, GoodsKind, OutgoingStatus};
pub use upload::{RawRow, SourceRow, UploadFile};
