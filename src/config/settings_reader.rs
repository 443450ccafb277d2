// ==========================================
// 铸造生产记录看板 - 设置读取 Trait
// ==========================================
// 职责: 定义应用层所需的设置读写接口（不包含实现）
// 红线: 读出的 Settings 必须已校验
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::settings::Settings;
use async_trait::async_trait;

// ==========================================
// SettingsReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）
#[async_trait]
pub trait SettingsReader: Send + Sync {
    /// 读取当前设置
    ///
    /// # 返回
    /// - Ok(Settings): 已校验设置（缺失的键取默认值）
    /// - Err: 存储错误或已存值非法
    async fn load_settings(&self) -> ConfigResult<Settings>;

    /// 保存设置（整体覆盖）
    async fn save_settings(&self, settings: &Settings) -> ConfigResult<()>;
}
