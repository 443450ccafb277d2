// ==========================================
// 铸造生产记录看板 - 生产汇总
// ==========================================
// 职责: 看板图表所需的分组统计（材质 / 温度档位 / 月份 / 炉号）
// 说明: 重量未知的记录计入条数，不计入吨数
// ==========================================

use crate::config::Settings;
use crate::domain::record::EnrichedRecord;
use crate::domain::types::{MaterialClass, TempBucket};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// GroupTotal - 单个分组的统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,  // 分组键
    pub count: usize, // 记录条数
    pub tonnes: f64,  // 吨数合计（未取整）
}

impl GroupTotal {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            count: 0,
            tonnes: 0.0,
        }
    }

    fn add(&mut self, record: &EnrichedRecord) {
        self.count += 1;
        self.tonnes += record.tonnes.unwrap_or(0.0);
    }
}

// ==========================================
// ProductionSummary - 生产汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub record_count: usize,
    pub total_tonnes: f64,         // 吨数合计（未取整）
    pub total_tonnes_rounded: f64, // 逐条取整后的合计（与表格一致）
    pub unknown_weight_count: usize,
    pub average_temperature: Option<f64>,

    pub by_material: Vec<GroupTotal>,    // 固定顺序: Cu, Tombak, Messing, Unklar
    pub by_temp_bucket: Vec<GroupTotal>, // 配置顺序，unmatched 在最后
    pub by_month: Vec<GroupTotal>,       // 时间正序（图表横轴）
    pub by_furnace: Vec<GroupTotal>,     // 炉号字典序
}

/// 计算生产汇总
pub fn summarize(records: &[EnrichedRecord], settings: &Settings) -> ProductionSummary {
    let mut by_material: Vec<GroupTotal> = MaterialClass::ALL
        .iter()
        .map(|m| GroupTotal::new(m.to_string()))
        .collect();

    let mut by_temp_bucket: Vec<GroupTotal> = settings
        .temp_buckets()
        .iter()
        .map(|b| GroupTotal::new(TempBucket::Target(*b).label()))
        .chain(std::iter::once(GroupTotal::new(TempBucket::Unmatched.label())))
        .collect();

    let mut by_month: BTreeMap<String, GroupTotal> = BTreeMap::new();
    let mut by_furnace: BTreeMap<String, GroupTotal> = BTreeMap::new();

    let mut total_tonnes = 0.0;
    let mut total_tonnes_rounded = 0.0;
    let mut unknown_weight_count = 0;
    let mut temperature_sum = 0.0;
    let mut temperature_count = 0usize;

    for record in records {
        match (record.tonnes, record.tonnes_rounded) {
            (Some(t), Some(r)) => {
                total_tonnes += t;
                total_tonnes_rounded += r;
            }
            _ => unknown_weight_count += 1,
        }
        if let Some(t) = record.temperature_c {
            temperature_sum += t;
            temperature_count += 1;
        }

        let material_key = record.material.to_string();
        if let Some(group) = by_material.iter_mut().find(|g| g.key == material_key) {
            group.add(record);
        }

        let bucket_key = record.temp_bucket.label();
        if let Some(group) = by_temp_bucket.iter_mut().find(|g| g.key == bucket_key) {
            group.add(record);
        }

        if let Some(month) = &record.month_key {
            by_month
                .entry(month.clone())
                .or_insert_with(|| GroupTotal::new(month.clone()))
                .add(record);
        }

        let furnace = if record.raw.furnace.is_empty() {
            "?".to_string()
        } else {
            record.raw.furnace.clone()
        };
        by_furnace
            .entry(furnace.clone())
            .or_insert_with(|| GroupTotal::new(furnace))
            .add(record);
    }

    ProductionSummary {
        record_count: records.len(),
        total_tonnes,
        total_tonnes_rounded,
        unknown_weight_count,
        average_temperature: (temperature_count > 0)
            .then(|| temperature_sum / temperature_count as f64),
        by_material,
        by_temp_bucket,
        by_month: by_month.into_values().collect(),
        by_furnace: by_furnace.into_values().collect(),
    }
}
