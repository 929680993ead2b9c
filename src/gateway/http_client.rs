// ==========================================
// 仓库库存登记系统 - HTTP 网关实现
// ==========================================
// 职责: 通过 reqwest 访问远端 REST 服务
// 约定:
// - 每次请求从会话存储读取 token（Bearer）
// - 任一接口返回 401: 清除本地会话
//   已登录请求返回 AuthExpired；登录/注册返回 Status 并保留后端信息（凭据被拒绝）
// - 非 2xx 响应优先提取 JSON 中的 message 字段
// ==========================================

use crate::domain::dashboard::{ChartDataPoint, DashboardStats, OwnershipDataPoint};
use crate::domain::goods::{IncomingGoods, ListQuery, OutgoingGoods, Page};
use crate::domain::notification::Notification;
use crate::domain::session::{
    AuthResponse, LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, UserProfile,
};
use crate::domain::types::GoodsKind;
use crate::domain::upload::UploadFile;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::inventory_gateway::{
    AuthGateway, DashboardGateway, InventoryGateway, NotificationGateway,
};
use crate::repository::session_repo::SessionStore;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// 批量导入接口响应
#[derive(Debug, Deserialize)]
struct BulkImportResponse {
    #[serde(default)]
    count: usize,
}

/// 后端错误响应体（字段均可缺失）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// 401 响应的解释方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unauthorized {
    // 已登录请求: token 失效
    SessionExpired,
    // 登录/注册: 凭据被拒绝
    CredentialsRejected,
}

// ==========================================
// HttpGateway
// ==========================================
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    session_store: Arc<dyn SessionStore>,
}

impl HttpGateway {
    /// 创建网关
    ///
    /// # 参数
    /// - base_url: 后端 API 基础地址（末尾 '/' 会被去除）
    /// - timeout: 全部请求共用的超时
    /// - session_store: token 来源，401 时被清除
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session_store: Arc<dyn SessionStore>,
    ) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 附加 Bearer token（无会话时不附加）
    fn authorize(&self, request: RequestBuilder) -> GatewayResult<RequestBuilder> {
        match self.session_store.token()? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        self.send_with(request, Unauthorized::SessionExpired).await
    }

    /// 发送请求并统一处理非 2xx 响应
    async fn send_with(
        &self,
        request: RequestBuilder,
        on_unauthorized: Unauthorized,
    ) -> GatewayResult<Response> {
        let response = self.authorize(request)?.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %response.url(), "后端返回 401，清除本地会话");
            if let Err(e) = self.session_store.clear() {
                tracing::error!(error = %e, "清除本地会话失败");
            }
            if on_unauthorized == Unauthorized::SessionExpired {
                return Err(GatewayError::AuthExpired);
            }
        }

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            tracing::debug!(status = status.as_u16(), message = %message, "后端返回错误");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        self.send_json_with(request, Unauthorized::SessionExpired)
            .await
    }

    async fn send_json_with<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        on_unauthorized: Unauthorized,
    ) -> GatewayResult<T> {
        let response = self.send_with(request, on_unauthorized).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// 从错误响应体中提取可读信息
fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() && text.len() <= 200 {
        return text;
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_string()
}

// ==========================================
// InventoryGateway 实现
// ==========================================
#[async_trait]
impl InventoryGateway for HttpGateway {
    async fn bulk_import(&self, kind: GoodsKind, file: &UploadFile) -> GatewayResult<usize> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);

        let url = self.url(&format!("{}/import", kind.resource_path()));
        let resp: BulkImportResponse = self
            .send_json(self.client.post(url).multipart(form))
            .await?;
        Ok(resp.count)
    }

    async fn create_incoming(&self, record: &IncomingGoods) -> GatewayResult<IncomingGoods> {
        let url = self.url(GoodsKind::Incoming.resource_path());
        self.send_json(self.client.post(url).json(record)).await
    }

    async fn create_outgoing(&self, record: &OutgoingGoods) -> GatewayResult<OutgoingGoods> {
        let url = self.url(GoodsKind::Outgoing.resource_path());
        self.send_json(self.client.post(url).json(record)).await
    }

    async fn list_incoming(&self, query: &ListQuery) -> GatewayResult<Page<IncomingGoods>> {
        let url = self.url(GoodsKind::Incoming.resource_path());
        self.send_json(self.client.get(url).query(query)).await
    }

    async fn list_outgoing(&self, query: &ListQuery) -> GatewayResult<Page<OutgoingGoods>> {
        let url = self.url(GoodsKind::Outgoing.resource_path());
        self.send_json(self.client.get(url).query(query)).await
    }

    async fn export_combined(&self) -> GatewayResult<Vec<u8>> {
        let response = self.send(self.client.get(self.url("export/combined"))).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

// ==========================================
// DashboardGateway 实现
// ==========================================
#[async_trait]
impl DashboardGateway for HttpGateway {
    async fn dashboard_stats(&self) -> GatewayResult<DashboardStats> {
        self.send_json(self.client.get(self.url("dashboard/stats")))
            .await
    }

    async fn chart_data(&self, months: u32) -> GatewayResult<Vec<ChartDataPoint>> {
        let request = self
            .client
            .get(self.url("dashboard/chart"))
            .query(&[("months", months)]);
        self.send_json(request).await
    }

    async fn ownership_data(&self) -> GatewayResult<Vec<OwnershipDataPoint>> {
        self.send_json(self.client.get(self.url("dashboard/ownership")))
            .await
    }
}

// ==========================================
// AuthGateway 实现
// ==========================================
#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse> {
        let request = self.client.post(self.url("auth/login")).json(request);
        self.send_json_with(request, Unauthorized::CredentialsRejected)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthResponse> {
        let request = self.client.post(self.url("auth/register")).json(request);
        self.send_json_with(request, Unauthorized::CredentialsRejected)
            .await
    }

    async fn logout(&self) -> GatewayResult<()> {
        self.send(self.client.post(self.url("auth/logout"))).await?;
        Ok(())
    }

    async fn profile(&self) -> GatewayResult<Option<UserProfile>> {
        let response = self.send(self.client.get(self.url("auth/profile"))).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<UserProfile> {
        self.send_json(self.client.put(self.url("auth/profile")).json(update))
            .await
    }

    async fn update_password(&self, change: &PasswordChange) -> GatewayResult<()> {
        self.send(self.client.put(self.url("auth/password")).json(change))
            .await?;
        Ok(())
    }
}

// ==========================================
// NotificationGateway 实现
// ==========================================
#[async_trait]
impl NotificationGateway for HttpGateway {
    async fn notifications(&self, limit: u32) -> GatewayResult<Vec<Notification>> {
        let request = self
            .client
            .get(self.url("notifications"))
            .query(&[("limit", limit)]);
        self.send_json(request).await
    }

    async fn mark_notification_read(&self, id: &str) -> GatewayResult<()> {
        let url = self.url(&format!("notifications/{}/read", id));
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> GatewayResult<()> {
        self.send(self.client.put(self.url("notifications/read-all")))
            .await?;
        Ok(())
    }
}
