// ==========================================
// 仓库库存登记系统 - 应用状态
// ==========================================
// 职责: 组装配置、会话存储、网关与 API 实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{ApiResult, AuthApi, InventoryApi, NotificationsApi};
use crate::config::{ClientConfigReader, ConfigManager};
use crate::db::open_sqlite_connection;
use crate::exporter::ReportExporter;
use crate::gateway::{
    AuthGateway, DashboardGateway, HttpGateway, InventoryGateway, NotificationGateway,
};
use crate::repository::{RepositoryError, SessionStore, SqliteSessionStore};

/// 显式指定本地数据库路径的环境变量
pub const DB_PATH_ENV: &str = "INVENTARIS_DB_PATH";

const DB_FILE_NAME: &str = "inventaris.db";

/// 应用状态
///
/// 所有 API 共享同一个本地 SQLite 连接与同一个 HTTP 网关
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 本地配置
    pub config: Arc<ConfigManager>,

    /// 登录会话存储
    pub session_store: Arc<dyn SessionStore>,

    /// 库存 API（导入/新增/列表/驾驶舱/导出）
    pub inventory_api: Arc<InventoryApi>,

    /// 认证 API
    pub auth_api: Arc<AuthApi>,

    /// 通知 API
    pub notifications_api: Arc<NotificationsApi>,

    /// 后端地址（展示用）
    pub api_base_url: String,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开本地数据库并建表
    /// 2. 读取配置并设置界面语言
    /// 3. 创建网关、导出器与 API 实例
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        let conn = open_sqlite_connection(&db_path).map_err(RepositoryError::from)?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 本地存储
        // ==========================================
        let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let session_store: Arc<dyn SessionStore> =
            Arc::new(SqliteSessionStore::from_connection(conn)?);

        crate::i18n::set_locale(&config.get_locale()?);

        // ==========================================
        // 后端网关
        // ==========================================
        let api_base_url = config.get_api_base_url()?;
        let http = Arc::new(HttpGateway::new(
            &api_base_url,
            config.get_request_timeout()?,
            session_store.clone(),
        )?);
        let inventory_gateway: Arc<dyn InventoryGateway> = http.clone();
        let dashboard_gateway: Arc<dyn DashboardGateway> = http.clone();
        let auth_gateway: Arc<dyn AuthGateway> = http.clone();
        let notification_gateway: Arc<dyn NotificationGateway> = http;

        // ==========================================
        // API 层
        // ==========================================
        let export_page_limit = config.get_export_page_limit()?;
        let exporter = ReportExporter::new(
            inventory_gateway.clone(),
            config.get_export_dir()?,
            export_page_limit,
        );
        let inventory_api = Arc::new(InventoryApi::new(
            inventory_gateway,
            dashboard_gateway,
            exporter,
            export_page_limit,
        ));
        let auth_api = Arc::new(AuthApi::new(auth_gateway, session_store.clone()));
        let notifications_api = Arc::new(NotificationsApi::new(notification_gateway));

        tracing::info!(api_base_url = %api_base_url, "AppState初始化完成");

        Ok(Self {
            db_path,
            config,
            session_store,
            inventory_api,
            auth_api,
            notifications_api,
            api_base_url,
        })
    }
}

/// 默认本地数据库路径
///
/// 优先级: 环境变量 INVENTARIS_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("inventaris-gudang");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
