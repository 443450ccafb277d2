// ==========================================
// 铸造生产记录看板 - 外部服务能力接口
// ==========================================
// 职责: 定义抽取/洞察两个外部能力（不包含实现）
// 说明: 任何视觉模型/文本模型后端都只是这些接口的一个实现
// ==========================================

use crate::adapters::error::{ExtractionError, InsightError};
use crate::config::Settings;
use crate::domain::record::{DocumentHandle, EnrichedRecord, RawRecord};
use async_trait::async_trait;

// ==========================================
// DocumentExtractor Trait
// ==========================================
// 用途: 上传文档 → 原始记录候选
// 实现者: JsonDocumentExtractor（以及外部视觉识别服务）
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// 从单个文档抽取原始记录
    ///
    /// # 参数
    /// - document: 文档句柄（内容对核心层不透明）
    /// - settings: 当前设置（可影响识别提示，不影响分类）
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 抽取结果（可为空）
    /// - Err(ExtractionError): 本文档失败
    async fn extract(
        &self,
        document: &DocumentHandle,
        settings: &Settings,
    ) -> Result<Vec<RawRecord>, ExtractionError>;
}

// ==========================================
// InsightProvider Trait
// ==========================================
// 用途: 当前筛选结果 → 简短文字总结
// 实现者: SummaryInsightProvider（以及外部文本模型服务）
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// 生成洞察文本
    ///
    /// # 返回
    /// - Ok(String): 总结文本
    /// - Err(InsightError): 调用方降级为"无洞察"
    async fn summarize(&self, records: &[EnrichedRecord]) -> Result<String, InsightError>;
}
