// ==========================================
// 仓库库存登记系统 - 认证 API
// ==========================================
// 职责: 登录/注册/登出/当前会话/档案与密码修改，会话经 SessionStore 持久化
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::session::{
    LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, Session,
};
use crate::gateway::error::GatewayError;
use crate::gateway::inventory_gateway::AuthGateway;
use crate::repository::session_repo::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// 密码最短长度
pub const MIN_PASSWORD_LEN: usize = 6;
/// 注册时姓名最短长度
pub const MIN_FULL_NAME_LEN: usize = 2;

fn validate_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidInput(format!(
            "密码至少 {} 位",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn validate_full_name(full_name: &str) -> ApiResult<()> {
    if full_name.chars().count() < MIN_FULL_NAME_LEN {
        return Err(ApiError::InvalidInput(format!(
            "姓名至少 {} 个字符",
            MIN_FULL_NAME_LEN
        )));
    }
    Ok(())
}

/// 去除首尾空白；可选字段留空表示清除
fn trim_field(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

pub struct AuthApi {
    gateway: Arc<dyn AuthGateway>,
    session_store: Arc<dyn SessionStore>,
}

impl AuthApi {
    pub fn new(gateway: Arc<dyn AuthGateway>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            session_store,
        }
    }

    /// 登录并保存会话
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidInput("邮箱不能为空".to_string()));
        }
        validate_password(password)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = Session::from(self.gateway.login(&request).await?);
        self.session_store.save(&session)?;

        info!(user_id = %session.user.id, role = %session.role, "登录成功");
        Ok(session)
    }

    /// 注册并保存会话
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> ApiResult<Session> {
        let email = email.trim();
        let full_name = full_name.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidInput("邮箱不能为空".to_string()));
        }
        validate_full_name(full_name)?;
        validate_password(password)?;

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };
        let session = Session::from(self.gateway.register(&request).await?);
        self.session_store.save(&session)?;

        info!(user_id = %session.user.id, "注册成功");
        Ok(session)
    }

    /// 登出: 后端调用失败不影响本地会话清除
    pub async fn sign_out(&self) -> ApiResult<()> {
        if self.session_store.token()?.is_some() {
            match self.gateway.logout().await {
                Ok(()) | Err(GatewayError::AuthExpired) => {}
                Err(e) => warn!(error = %e, "后端登出失败，仅清除本地会话"),
            }
        }

        self.session_store.clear()?;
        info!("已登出");
        Ok(())
    }

    pub fn current_session(&self) -> ApiResult<Option<Session>> {
        Ok(self.session_store.load()?)
    }

    /// 从后端刷新档案信息并回写本地会话
    pub async fn refresh_profile(&self) -> ApiResult<Session> {
        let mut session = self.session_store.load()?.ok_or(ApiError::NotSignedIn)?;

        session.profile = self.gateway.profile().await?;
        self.session_store.save(&session)?;
        Ok(session)
    }

    /// 更新档案并回写本地会话
    ///
    /// # 校验
    /// - 必须已登录
    /// - 至少提供一个字段；提供姓名时不少于 MIN_FULL_NAME_LEN 个字符
    pub async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<Session> {
        let mut session = self.session_store.load()?.ok_or(ApiError::NotSignedIn)?;

        let update = ProfileUpdate {
            full_name: trim_field(update.full_name),
            phone: trim_field(update.phone),
            division: trim_field(update.division),
            job_title: trim_field(update.job_title),
        };
        if update.is_empty() {
            return Err(ApiError::InvalidInput("未提供任何档案字段".to_string()));
        }
        if let Some(full_name) = &update.full_name {
            validate_full_name(full_name)?;
        }

        let profile = self.gateway.update_profile(&update).await?;
        session.profile = Some(profile);
        self.session_store.save(&session)?;

        info!(user_id = %session.user.id, "档案已更新");
        Ok(session)
    }

    /// 修改密码（不影响当前会话）
    pub async fn update_password(&self, current_password: &str, new_password: &str) -> ApiResult<()> {
        if self.session_store.token()?.is_none() {
            return Err(ApiError::NotSignedIn);
        }
        validate_password(current_password)?;
        validate_password(new_password)?;

        let change = PasswordChange {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.gateway.update_password(&change).await?;

        info!("密码已修改");
        Ok(())
    }
}
