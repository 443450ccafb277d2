// ==========================================
// 铸造生产记录看板 - JSON 文档抽取器
// ==========================================
// 用途: 已完成识别的文档（识别服务导出的 JSON）直接读取为原始记录
// 支持格式:
// - [ {...}, {...} ]
// - { "records": [ {...} ] }
// 扫描版 PDF 需交给外部视觉识别服务，此处拒绝
// ==========================================

use crate::adapters::adapter_trait::DocumentExtractor;
use crate::adapters::error::ExtractionError;
use crate::config::Settings;
use crate::domain::record::{DocumentHandle, RawRecord};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    List(Vec<RawRecord>),
    Wrapped { records: Vec<RawRecord> },
}

pub struct JsonDocumentExtractor;

impl JsonDocumentExtractor {
    fn accepts(document: &DocumentHandle) -> bool {
        document.content_type.eq_ignore_ascii_case("application/json")
            || document.name.to_lowercase().ends_with(".json")
    }
}

#[async_trait]
impl DocumentExtractor for JsonDocumentExtractor {
    async fn extract(
        &self,
        document: &DocumentHandle,
        _settings: &Settings,
    ) -> Result<Vec<RawRecord>, ExtractionError> {
        if !Self::accepts(document) {
            return Err(ExtractionError::UnsupportedDocument {
                name: document.name.clone(),
                content_type: document.content_type.clone(),
            });
        }

        let payload: JsonPayload = serde_json::from_slice(&document.bytes).map_err(|e| {
            ExtractionError::MalformedDocument {
                name: document.name.clone(),
                message: e.to_string(),
            }
        })?;

        let records = match payload {
            JsonPayload::List(records) => records,
            JsonPayload::Wrapped { records } => records,
        };

        debug!(document = %document.name, count = records.len(), "JSON 文档读取完成");
        Ok(records)
    }
}
