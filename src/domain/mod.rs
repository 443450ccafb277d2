// ==========================================
// 铸造生产记录看板 - 领域模型层
// ==========================================
// 职责: 定义记录实体与分类类型
// 红线: 不含解析逻辑,不含状态管理
// ==========================================

pub mod record;
pub mod types;

// 重导出核心类型
pub use record::{DocumentHandle, EnrichedRecord, RawRecord};
pub use types::{CenturyPolicy, MaterialClass, RoundingMode, TempBucket};
