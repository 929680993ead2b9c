// ==========================================
// 仓库库存登记系统 - 登录会话
// ==========================================
// 职责: 认证后端返回的用户/档案/角色 + 本地保存的会话
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    User,
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppRole::Admin => write!(f, "admin"),
            AppRole::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub division: Option<String>,
    pub job_title: Option<String>,
    pub avatar_url: Option<String>,
}

/// 登录/注册接口响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub token: String,
    pub profile: Option<UserProfile>,
    pub role: AppRole,
}

/// 本地保存的用户信息（不含 token）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
    pub role: AppRole,
}

/// 当前会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
    pub role: AppRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == AppRole::Admin
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.full_name.as_deref())
            .or(self.user.full_name.as_deref())
            .unwrap_or(&self.user.email)
    }

    pub fn stored_user(&self) -> StoredUser {
        StoredUser {
            user: self.user.clone(),
            profile: self.profile.clone(),
            role: self.role,
        }
    }

    pub fn from_parts(token: String, stored: StoredUser) -> Self {
        Self {
            token,
            user: stored.user,
            profile: stored.profile,
            role: stored.role,
        }
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: resp.token,
            user: resp.user,
            profile: resp.profile,
            role: resp.role,
        }
    }
}

/// 登录请求
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 注册请求
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// 档案更新请求（仅发送提供的字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.division.is_none()
            && self.job_title.is_none()
    }
}

/// 修改密码请求
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}
