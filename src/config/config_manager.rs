// ==========================================
// 仓库库存登记系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 本地 SQLite config_kv 表 (key-value)
// ==========================================

use crate::config::client_config_trait::ClientConfigReader;
use crate::db::{ensure_local_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 覆盖 api_base_url 的环境变量
pub const API_URL_ENV: &str = "INVENTARIS_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXPORT_PAGE_LIMIT: u32 = 10_000;
pub const DEFAULT_LOCALE: &str = "id";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 本地数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager（建表幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_local_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        if !config_keys::ALL.contains(&key) {
            return Err(RepositoryError::StoredValueError {
                key: key.to_string(),
                message: "未知配置项".to_string(),
            });
        }

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 删除配置值（恢复默认）
    pub fn reset_config_value(&self, key: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM config_kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有生效配置的快照（JSON格式，含默认值）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let mut config_map: BTreeMap<&str, String> = BTreeMap::new();
        config_map.insert(config_keys::API_BASE_URL, self.get_api_base_url()?);
        config_map.insert(
            config_keys::REQUEST_TIMEOUT_SECS,
            self.get_request_timeout()?.as_secs().to_string(),
        );
        config_map.insert(
            config_keys::EXPORT_PAGE_LIMIT,
            self.get_export_page_limit()?.to_string(),
        );
        config_map.insert(
            config_keys::EXPORT_DIR,
            self.get_export_dir()?.display().to_string(),
        );
        config_map.insert(config_keys::LOCALE, self.get_locale()?);

        serde_json::to_string_pretty(&json!(config_map)).map_err(|e| {
            RepositoryError::InternalError(format!("配置快照序列化失败: {}", e))
        })
    }
}

/// 环境变量优先于本地配置
fn resolve_base_url(env_value: Option<String>, stored: Option<String>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(stored)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

// ==========================================
// ClientConfigReader Trait 实现
// ==========================================
impl ClientConfigReader for ConfigManager {
    fn get_api_base_url(&self) -> RepositoryResult<String> {
        let stored = self.get_config_value(config_keys::API_BASE_URL)?;
        Ok(resolve_base_url(std::env::var(API_URL_ENV).ok(), stored))
    }

    fn get_request_timeout(&self) -> RepositoryResult<Duration> {
        let default = DEFAULT_REQUEST_TIMEOUT_SECS.to_string();
        let value = self.get_config_or_default(config_keys::REQUEST_TIMEOUT_SECS, &default)?;
        // 0 秒会使所有请求立即超时，按无效值处理
        let secs = value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                tracing::warn!(
                    config_key = config_keys::REQUEST_TIMEOUT_SECS,
                    raw_value = %value,
                    "超时配置无效，使用默认值"
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            });
        Ok(Duration::from_secs(secs))
    }

    fn get_export_page_limit(&self) -> RepositoryResult<u32> {
        let default = DEFAULT_EXPORT_PAGE_LIMIT.to_string();
        let value = self.get_config_or_default(config_keys::EXPORT_PAGE_LIMIT, &default)?;
        Ok(value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_EXPORT_PAGE_LIMIT))
    }

    fn get_export_dir(&self) -> RepositoryResult<PathBuf> {
        match self.get_config_value(config_keys::EXPORT_DIR)? {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir.trim())),
            _ => Ok(dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))),
        }
    }

    fn get_locale(&self) -> RepositoryResult<String> {
        let value = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)?;
        match value.trim().to_lowercase().as_str() {
            "en" => Ok("en".to_string()),
            _ => Ok(DEFAULT_LOCALE.to_string()),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 后端
    pub const API_BASE_URL: &str = "api_base_url";
    pub const REQUEST_TIMEOUT_SECS: &str = "request_timeout_secs";

    // 导出
    pub const EXPORT_PAGE_LIMIT: &str = "export_page_limit";
    pub const EXPORT_DIR: &str = "export_dir";

    // 界面
    pub const LOCALE: &str = "locale";

    pub const ALL: [&str; 5] = [
        API_BASE_URL,
        REQUEST_TIMEOUT_SECS,
        EXPORT_PAGE_LIMIT,
        EXPORT_DIR,
        LOCALE,
    ];
}
