// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 记录构造、可控的抽取器与洞察服务、临时设置库
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use foundry_dashboard::adapters::{
    DocumentExtractor, ExtractionError, InsightError, InsightProvider,
};
use foundry_dashboard::app::AppState;
use foundry_dashboard::config::Settings;
use foundry_dashboard::domain::{DocumentHandle, EnrichedRecord, RawRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// 构造一条原始记录
pub fn raw(id: &str, date: &str, temperature: &str, alloy: &str, weight: &str) -> RawRecord {
    RawRecord {
        id: id.to_string(),
        date: date.to_string(),
        furnace: "1".to_string(),
        temperature: temperature.to_string(),
        alloy: alloy.to_string(),
        weight: weight.to_string(),
        remarks: String::new(),
    }
}

pub fn pdf(name: &str) -> DocumentHandle {
    DocumentHandle::new(name, "application/pdf", name.as_bytes().to_vec())
}

// ==========================================
// MockExtractor - 按文档名返回预置记录
// ==========================================
pub struct MockExtractor {
    responses: HashMap<String, Vec<RawRecord>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_document(mut self, name: &str, records: Vec<RawRecord>) -> Self {
        self.responses.insert(name.to_string(), records);
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    /// 按调用顺序记录的文档名
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// 同时进行中的最大抽取数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(
        &self,
        document: &DocumentHandle,
        _settings: &Settings,
    ) -> Result<Vec<RawRecord>, ExtractionError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(document.name.clone());

        tokio::task::yield_now().await;

        let result = if self.failing.contains(&document.name) {
            Err(ExtractionError::Service(format!("{} not readable", document.name)))
        } else {
            Ok(self
                .responses
                .get(&document.name)
                .cloned()
                .unwrap_or_default())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

// ==========================================
// 洞察服务替身
// ==========================================

/// 返回记录条数的洞察服务
pub struct CountingInsight;

#[async_trait]
impl InsightProvider for CountingInsight {
    async fn summarize(&self, records: &[EnrichedRecord]) -> Result<String, InsightError> {
        Ok(format!("{} records", records.len()))
    }
}

/// 始终失败的洞察服务
pub struct FailingInsight;

#[async_trait]
impl InsightProvider for FailingInsight {
    async fn summarize(&self, _records: &[EnrichedRecord]) -> Result<String, InsightError> {
        Err(InsightError::Service("timeout".to_string()))
    }
}

/// 生成洞察期间用户改变了月份选择（模拟过期响应）
pub struct SupersededInsight {
    pub state: AppState,
    pub months: Vec<String>,
}

#[async_trait]
impl InsightProvider for SupersededInsight {
    async fn summarize(&self, records: &[EnrichedRecord]) -> Result<String, InsightError> {
        self.state.select_months(self.months.clone()).await;
        Ok(format!("{} records", records.len()))
    }
}

/// 创建临时设置数据库
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn std::error::Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temp path is not valid UTF-8")?
        .to_string();
    Ok((temp_file, db_path))
}
