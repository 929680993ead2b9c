// ==========================================
// 仓库库存登记系统 - 后端网关错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    // ===== 传输层错误 =====
    #[error("网络请求失败: {0}")]
    Network(String),

    // ===== 后端响应错误 =====
    #[error("后端返回错误 (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("登录已过期，请重新登录")]
    AuthExpired,

    #[error("响应解析失败: {0}")]
    Decode(String),

    // ===== 客户端错误 =====
    #[error("请求构造失败: {0}")]
    InvalidRequest(String),

    #[error("会话存储访问失败: {0}")]
    Session(#[from] RepositoryError),
}

impl GatewayError {
    /// 是否为认证过期（调用方需引导重新登录）
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, GatewayError::AuthExpired)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else if err.is_builder() {
            GatewayError::InvalidRequest(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
