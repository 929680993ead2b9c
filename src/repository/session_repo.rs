// ==========================================
// 仓库库存登记系统 - 会话仓储
// ==========================================
// 职责: 登录会话的持久化（local_kv 表，键 auth_token / user）
// 说明: 会话作为显式对象注入网关与 API，不使用全局状态
// ==========================================

use crate::db::{ensure_local_schema, open_sqlite_connection};
use crate::domain::session::{Session, StoredUser};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::warn;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

// ==========================================
// SessionStore Trait
// ==========================================
// 用途: 会话 load/save/clear 契约
// 实现者: SqliteSessionStore
pub trait SessionStore: Send + Sync {
    /// 读取会话（token 与用户信息任一缺失视为未登录）
    fn load(&self) -> RepositoryResult<Option<Session>>;

    /// 保存会话（登录/注册成功后）
    fn save(&self, session: &Session) -> RepositoryResult<()>;

    /// 清除会话（登出或 401）
    fn clear(&self) -> RepositoryResult<()>;

    /// 仅读取 token（每次请求调用）
    fn token(&self) -> RepositoryResult<Option<String>>;
}

pub struct SqliteSessionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSessionStore {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let store = Self { conn };
        {
            let conn = store.get_conn()?;
            ensure_local_schema(&conn)?;
        }
        Ok(store)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM local_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> RepositoryResult<Option<Session>> {
        let token = match self.token()? {
            Some(t) => t,
            None => return Ok(None),
        };
        let raw_user = match self.get_value(USER_KEY)? {
            Some(u) => u,
            None => return Ok(None),
        };

        match serde_json::from_str::<StoredUser>(&raw_user) {
            Ok(stored) => Ok(Some(Session::from_parts(token, stored))),
            Err(e) => {
                // 损坏的用户信息: 清除后按未登录处理
                warn!(error = %e, "本地用户信息解析失败，清除会话");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> RepositoryResult<()> {
        let user_json = serde_json::to_string(&session.stored_user()).map_err(|e| {
            RepositoryError::StoredValueError {
                key: USER_KEY.to_string(),
                message: e.to_string(),
            }
        })?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        for (key, value) in [(AUTH_TOKEN_KEY, session.token.as_str()), (USER_KEY, user_json.as_str())] {
            tx.execute(
                r#"
                INSERT INTO local_kv (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM local_kv WHERE key IN (?1, ?2)",
            params![AUTH_TOKEN_KEY, USER_KEY],
        )?;
        Ok(())
    }

    fn token(&self) -> RepositoryResult<Option<String>> {
        self.get_value(AUTH_TOKEN_KEY)
    }
}
