// ==========================================
// 铸造生产记录看板 - 上传批次错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单个文档失败不是批次错误（见 UploadOutcome.failures）
// ==========================================

use crate::importer::upload_importer::DocumentFailure;
use thiserror::Error;

/// 上传批次错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("批次中没有文档")]
    NoDocuments,

    #[error("文档读取失败: {path}: {message}")]
    DocumentReadError { path: String, message: String },

    /// 批次内所有文档均抽取失败，记录仓保持不变
    #[error("{message}")]
    AllFailed {
        failures: Vec<DocumentFailure>,
        message: String,
    },
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
