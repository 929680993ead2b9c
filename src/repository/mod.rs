// ==========================================
// 仓库库存登记系统 - 本地仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 本地 SQLite 中的会话数据访问
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod session_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use session_repo::{SessionStore, SqliteSessionStore};
