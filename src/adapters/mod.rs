// ==========================================
// 铸造生产记录看板 - 外部服务适配层
// ==========================================
// 职责: 文档抽取与洞察生成的接口及本地实现
// 红线: 核心层只依赖 trait，不依赖具体后端
// ==========================================

pub mod adapter_trait;
pub mod error;
pub mod json_extractor;
pub mod summary_insight;

pub use adapter_trait::{DocumentExtractor, InsightProvider};
pub use error::{ExtractionError, InsightError};
pub use json_extractor::JsonDocumentExtractor;
pub use summary_insight::SummaryInsightProvider;
