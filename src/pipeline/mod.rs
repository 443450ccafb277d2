// ==========================================
// 铸造生产记录看板 - 归一化管道
// ==========================================
// 职责: 原始记录 → 派生记录（纯函数，无状态）
// ==========================================

pub mod classifier;
pub mod field_cleaner;
pub mod month_key;
pub mod pipeline_trait;
pub mod record_normalizer;

// 重导出核心类型
pub use classifier::{Classifier as ClassifierImpl, DISPLAY_PRECISION};
pub use field_cleaner::FieldCleaner as FieldCleanerImpl;
pub use month_key::{month_key, month_key_with_policy};
pub use record_normalizer::{normalize, RecordNormalizer};

// 重导出 Trait 接口
pub use pipeline_trait::{FieldCleaner, RecordClassifier};
