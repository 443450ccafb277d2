// ==========================================
// 铸造生产记录看板 - 上传批次导入器
// ==========================================
// 职责: 一个上传批次 → 逐个文档抽取 → 汇总为 UploadOutcome
// 红线:
// - 批次内文档顺序抽取（前一个完成后才开始下一个）
// - 单个文档失败不丢弃其他文档的结果
// - 每个批次只产生一条面向用户的消息
// ==========================================

use crate::adapters::{DocumentExtractor, ExtractionError};
use crate::config::Settings;
use crate::domain::record::{DocumentHandle, RawRecord};
use crate::i18n::t_with_args;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 单个文档的失败信息
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    pub name: String,
    pub error: ExtractionError,
}

/// 一个上传批次的结果
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub batch_id: String,
    pub imported_at: DateTime<Utc>,
    pub document_count: usize,
    /// 成功文档的记录（按文档顺序拼接）
    pub records: Vec<RawRecord>,
    pub failures: Vec<DocumentFailure>,
    /// 面向用户的批次消息（已本地化）
    pub message: String,
}

impl UploadOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ==========================================
// UploadImporter - 上传导入器
// ==========================================
pub struct UploadImporter<E>
where
    E: DocumentExtractor,
{
    extractor: E,
}

impl<E> UploadImporter<E>
where
    E: DocumentExtractor,
{
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// 处理一个上传批次
    ///
    /// # 参数
    /// - documents: 批次内的文档（按用户选择顺序）
    /// - settings: 当前设置（透传给抽取器）
    ///
    /// # 返回
    /// - Ok(UploadOutcome): 至少一个文档成功（可能带部分失败）
    /// - Err(ImportError::NoDocuments): 空批次
    /// - Err(ImportError::AllFailed): 全部文档失败
    #[instrument(skip(self, documents, settings), fields(documents = documents.len()))]
    pub async fn import(
        &self,
        documents: Vec<DocumentHandle>,
        settings: &Settings,
    ) -> ImportResult<UploadOutcome> {
        if documents.is_empty() {
            return Err(ImportError::NoDocuments);
        }

        let batch_id = Uuid::new_v4().to_string();
        let document_count = documents.len();
        info!(batch_id = %batch_id, count = document_count, "开始处理上传批次");

        // 顺序抽取：then 逐个等待，不并发
        let results: Vec<(String, Result<Vec<RawRecord>, ExtractionError>)> =
            stream::iter(documents.iter())
                .then(|document| async move {
                    debug!(document = %document.name, "开始抽取文档");
                    let result = self.extractor.extract(document, settings).await;
                    match &result {
                        Ok(records) => {
                            info!(document = %document.name, records = records.len(), "文档抽取成功")
                        }
                        Err(e) => error!(document = %document.name, error = %e, "文档抽取失败"),
                    }
                    (document.name.clone(), result)
                })
                .collect()
                .await;

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(extracted) => records.extend(extracted),
                Err(error) => failures.push(DocumentFailure { name, error }),
            }
        }

        let assigned = assign_missing_ids(&mut records);
        if assigned > 0 {
            debug!(batch_id = %batch_id, assigned, "为缺少编号的记录分配 UUID");
        }

        let failed_names = failures
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if failures.len() == document_count {
            warn!(batch_id = %batch_id, failed = failures.len(), "上传批次全部失败");
            let message = t_with_args("upload.all_failed", &[("names", &failed_names)]);
            return Err(ImportError::AllFailed { failures, message });
        }

        let succeeded = document_count - failures.len();
        let message = if failures.is_empty() {
            t_with_args(
                "upload.success",
                &[
                    ("documents", &succeeded.to_string()),
                    ("records", &records.len().to_string()),
                ],
            )
        } else {
            t_with_args(
                "upload.partial_failure",
                &[
                    ("documents", &succeeded.to_string()),
                    ("records", &records.len().to_string()),
                    ("failed", &failures.len().to_string()),
                    ("names", &failed_names),
                ],
            )
        };

        info!(
            batch_id = %batch_id,
            total = document_count,
            success = succeeded,
            failed = failures.len(),
            records = records.len(),
            "上传批次处理完成"
        );

        Ok(UploadOutcome {
            batch_id,
            imported_at: Utc::now(),
            document_count,
            records,
            failures,
            message,
        })
    }
}

/// 为编号为空的记录分配 UUID，返回分配数量
fn assign_missing_ids(records: &mut [RawRecord]) -> usize {
    let mut assigned = 0;
    for record in records.iter_mut().filter(|r| r.id.trim().is_empty()) {
        record.id = Uuid::new_v4().to_string();
        assigned += 1;
    }
    assigned
}
