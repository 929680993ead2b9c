// ==========================================
// 仓库库存登记系统 - API层错误类型
// ==========================================
// 职责: 将网关/仓储/导出错误转换为用户可读的错误消息
// ==========================================

use crate::exporter::error::ExportError;
use crate::gateway::error::GatewayError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 单条新增时必填字段缺失
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 认证错误
    // ==========================================
    #[error("尚未登录")]
    NotSignedIn,

    #[error("登录已过期，请重新登录")]
    AuthExpired,

    // ==========================================
    // 远端服务错误
    // ==========================================
    #[error("后端错误 (HTTP {status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("网络错误: {0}")]
    NetworkError(String),

    // ==========================================
    // 文件错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("报表导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 本地存储错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::StoredValueError { key, message } => {
                ApiError::InvalidInput(format!("配置项{}错误: {}", key, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 GatewayError 转换
// ==========================================
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::AuthExpired => ApiError::AuthExpired,
            GatewayError::Status { status, message } => ApiError::BackendError { status, message },
            GatewayError::Network(msg) => ApiError::NetworkError(msg),
            GatewayError::Decode(msg) => {
                ApiError::InternalError(format!("后端响应格式错误: {}", msg))
            }
            GatewayError::InvalidRequest(msg) => ApiError::InternalError(msg),
            GatewayError::Session(err) => ApiError::from(err),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Gateway(err) => ApiError::from(err),
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
