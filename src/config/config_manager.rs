// ==========================================
// 铸造生产记录看板 - 配置管理器
// ==========================================
// 职责: 设置加载、保存、快照
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::settings::{Settings, SettingsDraft};
use crate::config::settings_reader::SettingsReader;
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::domain::types::CenturyPolicy;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// 配置键
pub mod config_keys {
    pub const ROUNDING_MODE: &str = "rounding_mode";
    pub const TOMBAK_THRESHOLD: &str = "tombak_threshold";
    pub const TOMBAK_BAND: &str = "tombak_band";
    pub const TEMP_BUCKETS: &str = "temp_buckets";
    pub const TEMP_TOLERANCE: &str = "temp_tolerance";
    pub const CENTURY_POLICY: &str = "century_policy";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;
        info!(db_path = %db_path, "配置库已打开");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存配置库（测试/临时会话）
    pub fn in_memory() -> ConfigResult<Self> {
        let conn = Connection::open_in_memory()?;
        configure_sqlite_connection(&conn)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> ConfigResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| ConfigError::ReadError {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(value)
    }

    /// 写入单个配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    fn parse_f64(key: &str, raw: String) -> ConfigResult<f64> {
        raw.trim().parse::<f64>().map_err(|e| ConfigError::ValueError {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
    }

    /// 读取设置（同步版本）
    ///
    /// 缺失的键取默认值；组装后的草稿统一走 Settings 校验
    pub fn read_settings(&self) -> ConfigResult<Settings> {
        let mut draft = SettingsDraft::default();

        if let Some(v) = self.get_config_value(config_keys::ROUNDING_MODE)? {
            draft.rounding_mode = v;
        }
        if let Some(v) = self.get_config_value(config_keys::TOMBAK_THRESHOLD)? {
            draft.tombak_threshold = Self::parse_f64(config_keys::TOMBAK_THRESHOLD, v)?;
        }
        if let Some(v) = self.get_config_value(config_keys::TOMBAK_BAND)? {
            draft.tombak_band = Self::parse_f64(config_keys::TOMBAK_BAND, v)?;
        }
        if let Some(v) = self.get_config_value(config_keys::TEMP_BUCKETS)? {
            draft.temp_buckets =
                serde_json::from_str::<Vec<f64>>(&v).map_err(|e| ConfigError::ValueError {
                    key: config_keys::TEMP_BUCKETS.to_string(),
                    value: v.clone(),
                    message: e.to_string(),
                })?;
        }
        if let Some(v) = self.get_config_value(config_keys::TEMP_TOLERANCE)? {
            draft.temp_tolerance = Self::parse_f64(config_keys::TEMP_TOLERANCE, v)?;
        }
        if let Some(v) = self.get_config_value(config_keys::CENTURY_POLICY)? {
            draft.century_policy = serde_json::from_str::<CenturyPolicy>(&v).map_err(|e| {
                ConfigError::ValueError {
                    key: config_keys::CENTURY_POLICY.to_string(),
                    value: v.clone(),
                    message: e.to_string(),
                }
            })?;
        }

        let settings = Settings::try_from(draft)?;
        debug!(?settings, "设置已读取");
        Ok(settings)
    }

    /// 保存设置（同步版本，单事务写入全部键）
    pub fn write_settings(&self, settings: &Settings) -> ConfigResult<()> {
        let entries = [
            (
                config_keys::ROUNDING_MODE,
                settings.rounding_mode().to_string(),
            ),
            (
                config_keys::TOMBAK_THRESHOLD,
                settings.tombak_threshold().to_string(),
            ),
            (config_keys::TOMBAK_BAND, settings.tombak_band().to_string()),
            (
                config_keys::TEMP_BUCKETS,
                serde_json::to_string(settings.temp_buckets())?,
            ),
            (
                config_keys::TEMP_TOLERANCE,
                settings.temp_tolerance().to_string(),
            ),
            (
                config_keys::CENTURY_POLICY,
                serde_json::to_string(&settings.century_policy())?,
            ),
        ];

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for (key, value) in entries.iter() {
            tx.execute(
                r#"
                INSERT INTO config_kv (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;

        info!(rounding_mode = %settings.rounding_mode(), "设置已保存");
        Ok(())
    }
}

#[async_trait]
impl SettingsReader for ConfigManager {
    async fn load_settings(&self) -> ConfigResult<Settings> {
        self.read_settings()
    }

    async fn save_settings(&self, settings: &Settings) -> ConfigResult<()> {
        self.write_settings(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RoundingMode;

    #[test]
    fn test_empty_store_yields_defaults() {
        let manager = ConfigManager::in_memory().unwrap();
        assert_eq!(manager.read_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_write_then_read() {
        let manager = ConfigManager::in_memory().unwrap();
        let settings = Settings::default()
            .update(|d| {
                d.rounding_mode = "always-up".to_string();
                d.temp_buckets = vec![560.0, 600.0];
                d.century_policy = CenturyPolicy::Pivot { pivot: 60 };
            })
            .unwrap();

        manager.write_settings(&settings).unwrap();
        let loaded = manager.read_settings().unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.rounding_mode(), RoundingMode::AlwaysUp);
    }

    #[test]
    fn test_invalid_stored_value_rejected() {
        let manager = ConfigManager::in_memory().unwrap();
        manager
            .set_config_value(config_keys::ROUNDING_MODE, "sometimes")
            .unwrap();
        assert!(matches!(
            manager.read_settings(),
            Err(ConfigError::UnknownRoundingMode(_))
        ));
    }

    #[test]
    fn test_malformed_number_reports_key() {
        let manager = ConfigManager::in_memory().unwrap();
        manager
            .set_config_value(config_keys::TEMP_TOLERANCE, "fünf")
            .unwrap();
        match manager.read_settings() {
            Err(ConfigError::ValueError { key, .. }) => assert_eq!(key, "temp_tolerance"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_contains_saved_keys() {
        let manager = ConfigManager::in_memory().unwrap();
        manager.write_settings(&Settings::default()).unwrap();
        let snapshot: serde_json::Value =
            serde_json::from_str(&manager.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot["rounding_mode"], "standard");
        assert_eq!(snapshot["temp_buckets"], "[570.0,610.0,650.0]");
    }
}
