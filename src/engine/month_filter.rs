// ==========================================
// 铸造生产记录看板 - 月份筛选
// ==========================================
// 规则:
// - 选择为空 → 不筛选，返回全部记录（含无月份键的记录）
// - 选择非空 → 只返回月份键属于选择集合的记录
// - 可选月份来自全量数据（而非筛选结果），去重后按字符串倒序
// ==========================================

use crate::domain::record::EnrichedRecord;
use std::collections::BTreeSet;

/// 按月份选择筛选记录
pub fn filter_by_months(
    records: &[EnrichedRecord],
    selected: &BTreeSet<String>,
) -> Vec<EnrichedRecord> {
    if selected.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| {
            r.month_key
                .as_ref()
                .map_or(false, |key| selected.contains(key))
        })
        .cloned()
        .collect()
}

/// 全量数据中出现过的月份（最近的在前）
pub fn available_months(records: &[EnrichedRecord]) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.month_key.as_deref())
        .collect();

    distinct.into_iter().rev().map(str::to_string).collect()
}
