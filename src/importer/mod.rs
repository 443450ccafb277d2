// ==========================================
// 铸造生产记录看板 - 导入层
// ==========================================
// 职责: 上传批次 → 原始记录（经外部抽取能力）
// ==========================================

pub mod error;
pub mod upload_importer;

pub use error::{ImportError, ImportResult};
pub use upload_importer::{DocumentFailure, UploadImporter, UploadOutcome};
