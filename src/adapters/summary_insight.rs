// ==========================================
// 铸造生产记录看板 - 本地规则洞察
// ==========================================
// 用途: 无外部文本模型时的洞察实现（确定性文字总结）
// 内容: 批次数 / 总吨数 / 主材质占比 / 最常见温度档位 / 待复核记录数
// ==========================================

use crate::adapters::adapter_trait::InsightProvider;
use crate::adapters::error::InsightError;
use crate::domain::record::EnrichedRecord;
use crate::domain::types::MaterialClass;
use crate::i18n::t_with_args;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub struct SummaryInsightProvider;

impl SummaryInsightProvider {
    fn compose(records: &[EnrichedRecord]) -> String {
        let total_tonnes: f64 = records.iter().filter_map(|r| r.tonnes).sum();

        let mut material_counts: BTreeMap<MaterialClass, usize> = BTreeMap::new();
        let mut bucket_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut review = 0usize;

        for record in records {
            *material_counts.entry(record.material).or_default() += 1;
            if record.temp_bucket.is_matched() {
                *bucket_counts.entry(record.temp_bucket.label()).or_default() += 1;
            }
            if record.material == MaterialClass::Unklar
                || !record.temp_bucket.is_matched()
                || record.tonnes.is_none()
            {
                review += 1;
            }
        }

        // 计数相同取展示顺序靠前者
        let (top_material, top_count) = MaterialClass::ALL
            .iter()
            .map(|m| (*m, material_counts.get(m).copied().unwrap_or(0)))
            .fold((MaterialClass::Unklar, 0), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });
        let share = top_count as f64 * 100.0 / records.len() as f64;

        let top_bucket = bucket_counts
            .iter()
            .fold(None::<(&String, usize)>, |best, (label, count)| match best {
                Some((_, c)) if c >= *count => best,
                _ => Some((label, *count)),
            })
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| "-".to_string());

        t_with_args(
            "insight.summary",
            &[
                ("count", &records.len().to_string()),
                ("tonnes", &format!("{:.2}", total_tonnes)),
                ("material", &top_material.to_string()),
                ("share", &format!("{:.0}", share)),
                ("bucket", &top_bucket),
                ("review", &review.to_string()),
            ],
        )
    }
}

#[async_trait]
impl InsightProvider for SummaryInsightProvider {
    async fn summarize(&self, records: &[EnrichedRecord]) -> Result<String, InsightError> {
        if records.is_empty() {
            return Err(InsightError::NoData);
        }
        Ok(Self::compose(records))
    }
}
