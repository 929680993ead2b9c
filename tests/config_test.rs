// ==========================================
// 配置与本地存储集成测试
// ==========================================
// 测试目标: config_kv 持久化、配置快照、会话与配置共用同一数据库文件
// ==========================================

use inventaris_gudang::config::{config_keys, ClientConfigReader, ConfigManager};
use inventaris_gudang::domain::{AppRole, AuthUser, Session, UserProfile};
use inventaris_gudang::repository::{SessionStore, SqliteSessionStore};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

fn temp_db() -> (NamedTempFile, String) {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    (temp_file, db_path)
}

#[test]
fn test_config_persists_across_instances() {
    let (_file, db_path) = temp_db();

    {
        let config = ConfigManager::new(&db_path).unwrap();
        config
            .set_config_value(config_keys::REQUEST_TIMEOUT_SECS, "45")
            .unwrap();
        config
            .set_config_value(config_keys::EXPORT_DIR, "/srv/laporan")
            .unwrap();
        config.set_config_value(config_keys::LOCALE, "EN").unwrap();
    }

    let config = ConfigManager::new(&db_path).unwrap();
    assert_eq!(config.get_request_timeout().unwrap(), Duration::from_secs(45));
    assert_eq!(config.get_export_dir().unwrap(), PathBuf::from("/srv/laporan"));
    assert_eq!(config.get_locale().unwrap(), "en");
    assert_eq!(
        config
            .get_config_value(config_keys::REQUEST_TIMEOUT_SECS)
            .unwrap()
            .as_deref(),
        Some("45")
    );
}

#[test]
fn test_config_snapshot_lists_effective_values() {
    let (_file, db_path) = temp_db();
    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_config_value(config_keys::EXPORT_PAGE_LIMIT, "2500")
        .unwrap();

    let snapshot: serde_json::Value =
        serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();

    for key in config_keys::ALL {
        assert!(snapshot.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(snapshot[config_keys::EXPORT_PAGE_LIMIT], "2500");
    assert_eq!(snapshot[config_keys::REQUEST_TIMEOUT_SECS], "30");
}

#[test]
fn test_session_and_config_share_database() {
    let (_file, db_path) = temp_db();

    let config = ConfigManager::new(&db_path).unwrap();
    let store = SqliteSessionStore::new(&db_path).unwrap();

    let session = Session {
        token: "tok-abc".to_string(),
        user: AuthUser {
            id: "u-9".to_string(),
            email: "sari@gudang.id".to_string(),
            full_name: Some("Sari".to_string()),
        },
        profile: Some(UserProfile {
            division: Some("Logistik".to_string()),
            ..Default::default()
        }),
        role: AppRole::Admin,
    };
    store.save(&session).unwrap();
    config.set_config_value(config_keys::LOCALE, "id").unwrap();

    // 重新打开后会话仍在
    let reopened = SqliteSessionStore::new(&db_path).unwrap();
    let loaded = reopened.load().unwrap().unwrap();
    assert_eq!(loaded, session);
    assert_eq!(reopened.token().unwrap().as_deref(), Some("tok-abc"));

    reopened.clear().unwrap();
    assert!(store.load().unwrap().is_none());
    assert_eq!(config.get_locale().unwrap(), "id");
}
