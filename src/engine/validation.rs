// ==========================================
// 铸造生产记录看板 - 校验视图
// ==========================================
// 职责: 找出需要人工复核的记录（字段无法解析 / 档位未命中 / 日期异常）
// 说明: 只报告，不修改也不剔除记录
// ==========================================

use crate::domain::record::EnrichedRecord;
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};

/// 默认重量异常上限（kg），超过多半是单位识别错误
pub const DEFAULT_WEIGHT_ANOMALY_KG: f64 = 50_000.0;

// ==========================================
// IssueLevel - 问题级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLevel {
    Warning, // 影响统计（吨数/分类缺失）
    Info,    // 仅提示
}

// ==========================================
// ValidationIssue - 单条问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub index: usize,      // 记录在当前列表中的位置
    pub record_id: String, // 记录标识
    pub level: IssueLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// ValidationReport - 校验报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_records: usize,
    pub affected_records: usize,
    pub warnings: usize,
    pub infos: usize,
    pub issues: Vec<ValidationIssue>,
}

pub struct RecordValidator {
    weight_anomaly_kg: f64,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_ANOMALY_KG)
    }
}

impl RecordValidator {
    pub fn new(weight_anomaly_kg: f64) -> Self {
        Self { weight_anomaly_kg }
    }

    /// 校验单条记录
    pub fn validate_record(&self, index: usize, record: &EnrichedRecord) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut push = |level: IssueLevel, field: &str, key: &str, value: &str| {
            issues.push(ValidationIssue {
                index,
                record_id: record.raw.id.clone(),
                level,
                field: field.to_string(),
                message: t_with_args(key, &[("value", value)]),
            });
        };

        match record.weight_kg {
            None => push(IssueLevel::Warning, "weight", "validation.weight_unknown", &record.raw.weight),
            Some(kg) if kg <= 0.0 => {
                push(IssueLevel::Warning, "weight", "validation.weight_not_positive", &record.raw.weight)
            }
            Some(kg) if kg > self.weight_anomaly_kg => {
                push(IssueLevel::Warning, "weight", "validation.weight_anomaly", &record.raw.weight)
            }
            _ => {}
        }

        if record.alloy_value.is_none() {
            push(IssueLevel::Warning, "alloy", "validation.alloy_unknown", &record.raw.alloy);
        }

        match record.temperature_c {
            None => push(
                IssueLevel::Warning,
                "temperature",
                "validation.temperature_unknown",
                &record.raw.temperature,
            ),
            Some(_) if !record.temp_bucket.is_matched() => push(
                IssueLevel::Info,
                "temperature",
                "validation.temperature_unmatched",
                &record.raw.temperature,
            ),
            _ => {}
        }

        if record.month_key.is_none() {
            push(IssueLevel::Warning, "date", "validation.date_malformed", &record.raw.date);
        }

        issues
    }

    /// 生成校验报告
    pub fn validate(&self, records: &[EnrichedRecord]) -> ValidationReport {
        let mut issues = Vec::new();
        let mut affected_records = 0;

        for (index, record) in records.iter().enumerate() {
            let record_issues = self.validate_record(index, record);
            if !record_issues.is_empty() {
                affected_records += 1;
            }
            issues.extend(record_issues);
        }

        let warnings = issues
            .iter()
            .filter(|i| i.level == IssueLevel::Warning)
            .count();
        let infos = issues.len() - warnings;

        ValidationReport {
            total_records: records.len(),
            affected_records,
            warnings,
            infos,
            issues,
        }
    }
}
