// ==========================================
// 仓库库存登记系统 - 通知 API
// ==========================================
// 职责: 拉取通知、标记已读
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::notification::{Notification, DEFAULT_NOTIFICATION_LIMIT};
use crate::gateway::inventory_gateway::NotificationGateway;
use std::sync::Arc;
use tracing::{debug, info};

pub struct NotificationsApi {
    gateway: Arc<dyn NotificationGateway>,
}

impl NotificationsApi {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// 最近的通知
    ///
    /// # 参数
    /// - limit: None 时取 DEFAULT_NOTIFICATION_LIMIT
    pub async fn list(&self, limit: Option<u32>) -> ApiResult<Vec<Notification>> {
        let limit = limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }

        let items = self.gateway.notifications(limit).await?;
        debug!(limit = limit, fetched = items.len(), "通知拉取完成");
        Ok(items)
    }

    pub async fn mark_read(&self, id: &str) -> ApiResult<()> {
        let id = id.trim();
        // id 作为路径段拼接，拒绝会改变路径的字符
        if id.is_empty() || id.contains(['/', '?', '#']) {
            return Err(ApiError::InvalidInput(format!("无效的通知 ID: '{}'", id)));
        }

        self.gateway.mark_notification_read(id).await?;
        info!(notification_id = %id, "通知已标记为已读");
        Ok(())
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        self.gateway.mark_all_notifications_read().await?;
        info!("全部通知已标记为已读");
        Ok(())
    }
}
