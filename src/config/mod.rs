// ==========================================
// 铸造生产记录看板 - 配置层
// ==========================================
// 职责: 分类设置的校验、持久化与读取
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod settings;
pub mod settings_reader;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use settings::{Settings, SettingsDraft};
pub use settings_reader::SettingsReader;
