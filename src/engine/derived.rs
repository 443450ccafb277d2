// ==========================================
// 铸造生产记录看板 - 派生视图
// ==========================================
// 流程: 记录仓 + 设置 → 派生记录 → 可选月份 → 月份筛选
// 红线:
// - 记录仓或设置变化 → 从头整体重算，不做增量修补
// - 缓存键 = (记录仓版本, 完整设置)；设置不相等时绝不复用
// ==========================================

use crate::config::Settings;
use crate::domain::record::{EnrichedRecord, RawRecord};
use crate::engine::month_filter::{available_months, filter_by_months};
use crate::pipeline::RecordNormalizer;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// DerivedView - 派生视图（供界面与洞察服务使用）
// ==========================================
#[derive(Debug, Clone)]
pub struct DerivedView {
    pub enriched: Arc<Vec<EnrichedRecord>>,  // 全量派生记录
    pub available_months: Arc<Vec<String>>,  // 全量可选月份（倒序）
    pub selected_months: BTreeSet<String>,   // 当前选择
    pub filtered: Vec<EnrichedRecord>,       // 筛选结果
}

struct CacheEntry {
    store_version: u64,
    settings: Settings,
    enriched: Arc<Vec<EnrichedRecord>>,
    available_months: Arc<Vec<String>>,
}

// ==========================================
// DerivedCache - 派生结果缓存
// ==========================================
pub struct DerivedCache {
    normalizer: RecordNormalizer,
    entry: Option<CacheEntry>,
    computations: u64,
}

impl Default for DerivedCache {
    fn default() -> Self {
        Self::new(RecordNormalizer::default())
    }
}

impl DerivedCache {
    pub fn new(normalizer: RecordNormalizer) -> Self {
        Self {
            normalizer,
            entry: None,
            computations: 0,
        }
    }

    /// 全量重算次数（缓存未命中次数）
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// 丢弃缓存
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// 获取派生视图
    ///
    /// # 参数
    /// - raws: 记录仓全量原始记录
    /// - store_version: 记录仓版本（每次追加递增）
    /// - settings: 当前设置
    /// - selected: 月份选择（空 = 不筛选）
    pub fn view(
        &mut self,
        raws: &[RawRecord],
        store_version: u64,
        settings: &Settings,
        selected: &BTreeSet<String>,
    ) -> DerivedView {
        let entry = match self.entry.take() {
            Some(e) if e.store_version == store_version && e.settings == *settings => e,
            _ => {
                let enriched = self.normalizer.normalize_all(raws, settings);
                let months = available_months(&enriched);
                self.computations += 1;
                debug!(
                    store_version,
                    records = enriched.len(),
                    months = months.len(),
                    "派生视图已重算"
                );
                CacheEntry {
                    store_version,
                    settings: settings.clone(),
                    enriched: Arc::new(enriched),
                    available_months: Arc::new(months),
                }
            }
        };

        let enriched = Arc::clone(&entry.enriched);
        let months = Arc::clone(&entry.available_months);
        self.entry = Some(entry);

        let filtered = filter_by_months(&enriched, selected);

        DerivedView {
            enriched,
            available_months: months,
            selected_months: selected.clone(),
            filtered,
        }
    }
}
