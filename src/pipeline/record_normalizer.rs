// ==========================================
// 铸造生产记录看板 - 记录归一化器
// ==========================================
// 职责: RawRecord + Settings → EnrichedRecord
// 流程: 清洗 → 数值解析 → 吨数/取整 → 材质分类 → 温度档位 → 月份键
// 红线: 全函数，从不报错；解析失败的字段降级为 None
// ==========================================

use crate::config::Settings;
use crate::domain::record::{EnrichedRecord, RawRecord};
use crate::pipeline::classifier::Classifier;
use crate::pipeline::field_cleaner::FieldCleaner;
use crate::pipeline::month_key::month_key_with_policy;
use crate::pipeline::pipeline_trait::{FieldCleaner as FieldCleanerTrait, RecordClassifier};
use tracing::debug;

// ==========================================
// RecordNormalizer - 记录归一化器
// ==========================================
pub struct RecordNormalizer {
    field_cleaner: Box<dyn FieldCleanerTrait>,
    classifier: Box<dyn RecordClassifier>,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(Box::new(FieldCleaner), Box::new(Classifier))
    }
}

impl RecordNormalizer {
    /// 创建归一化器
    ///
    /// # 参数
    /// - field_cleaner: 字段清洗器
    /// - classifier: 分类服务
    pub fn new(
        field_cleaner: Box<dyn FieldCleanerTrait>,
        classifier: Box<dyn RecordClassifier>,
    ) -> Self {
        Self {
            field_cleaner,
            classifier,
        }
    }

    /// 归一化单条记录
    pub fn normalize(&self, raw: &RawRecord, settings: &Settings) -> EnrichedRecord {
        let cleaned = RawRecord {
            id: self.field_cleaner.clean_text(&raw.id),
            date: self.field_cleaner.clean_text(&raw.date),
            furnace: self.field_cleaner.clean_text(&raw.furnace),
            temperature: raw.temperature.clone(),
            alloy: raw.alloy.clone(),
            weight: raw.weight.clone(),
            remarks: raw.remarks.trim().to_string(),
        };

        let temperature_c = self.field_cleaner.parse_number(&raw.temperature);
        let alloy_value = self.field_cleaner.parse_number(&raw.alloy);
        let weight_kg = self.field_cleaner.parse_number(&raw.weight);

        let tonnes = weight_kg.map(|kg| kg / 1000.0);
        let tonnes_rounded =
            tonnes.map(|t| self.classifier.round_tonnes(t, settings.rounding_mode()));

        let material = self.classifier.classify_material(alloy_value, settings);
        let temp_bucket = self.classifier.assign_temp_bucket(temperature_c, settings);
        let month_key = month_key_with_policy(&cleaned.date, settings.century_policy());

        EnrichedRecord {
            raw: cleaned,
            temperature_c,
            alloy_value,
            weight_kg,
            tonnes,
            tonnes_rounded,
            material,
            temp_bucket,
            month_key,
        }
    }

    /// 从头归一化全部记录（设置或记录仓变化后整体重算）
    pub fn normalize_all(&self, raws: &[RawRecord], settings: &Settings) -> Vec<EnrichedRecord> {
        let enriched: Vec<EnrichedRecord> =
            raws.iter().map(|raw| self.normalize(raw, settings)).collect();
        debug!(count = enriched.len(), "记录归一化完成");
        enriched
    }
}

/// 使用默认组件归一化单条记录
pub fn normalize(raw: &RawRecord, settings: &Settings) -> EnrichedRecord {
    RecordNormalizer::default().normalize(raw, settings)
}
