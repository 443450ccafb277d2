// ==========================================
// 铸造生产记录看板 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 非法配置属于编程/配置错误，在设置边界拒绝，不进入归一化流程
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 设置校验错误 =====
    #[error("未知的取整模式: {0}（仅支持 standard / always-up）")]
    UnknownRoundingMode(String),

    #[error("Tombak 阈值非法: {0}（需为 0~100 的有限数值）")]
    InvalidThreshold(f64),

    #[error("Tombak 区间宽度非法: {0}（需为非负有限数值）")]
    InvalidBand(f64),

    #[error("温度档位必须为有限数值且严格递增: {0:?}")]
    NonAscendingBuckets(Vec<f64>),

    #[error("温度容差非法: {0}（需为非负有限数值）")]
    InvalidTolerance(f64),

    #[error("世纪策略非法: {0}")]
    InvalidCenturyPolicy(String),

    // ===== 存储错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置存储失败: {0}")]
    StorageError(String),

    #[error("锁获取失败: {0}")]
    LockError(String),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ConfigError {
    fn from(err: rusqlite::Error) -> Self {
        ConfigError::StorageError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::StorageError(format!("JSON 序列化失败: {}", err))
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
