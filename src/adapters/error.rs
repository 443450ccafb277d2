// ==========================================
// 铸造生产记录看板 - 外部服务错误类型
// ==========================================
// ExtractionError: 单个文档抽取失败（批次内隔离，不影响其他文档）
// InsightError: 洞察生成失败（静默降级为"无洞察"）
// ==========================================

use thiserror::Error;

/// 文档抽取错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("不支持的文档类型: {name} ({content_type})")]
    UnsupportedDocument { name: String, content_type: String },

    #[error("文档内容无法解析: {name}: {message}")]
    MalformedDocument { name: String, message: String },

    #[error("识别服务调用失败: {0}")]
    Service(String),

    #[error("识别服务超时: {0}")]
    Timeout(String),
}

/// 洞察生成错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    #[error("没有可分析的记录")]
    NoData,

    #[error("洞察服务调用失败: {0}")]
    Service(String),
}
