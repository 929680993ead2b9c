// ==========================================
// 仓库库存登记系统 - 通知
// ==========================================
// 职责: 后端推送给当前用户的通知（只读，已读状态由后端维护）
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认拉取条数
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    // None = 广播通知
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: String,
}

/// 未读条数
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
