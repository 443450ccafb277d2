// ==========================================
// 铸造生产记录看板 - 应用状态
// ==========================================
// 职责: 唯一的状态持有者（记录仓 / 设置 / 月份选择 / 洞察）
// 红线:
// - 记录仓只追加，批次结果一次性追加
// - 外部调用（抽取 / 洞察）期间不持有锁；设置写回在锁内完成
// - 洞察响应晚于新状态到达时丢弃（代数计数器）
// ==========================================

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{DocumentExtractor, InsightProvider};
use crate::config::{ConfigResult, Settings, SettingsDraft, SettingsReader};
use crate::domain::record::{DocumentHandle, RawRecord};
use crate::engine::{summarize, DerivedCache, DerivedView, ProductionSummary, RecordValidator, ValidationReport};
use crate::export::{write_csv, ExportError};
use crate::importer::{ImportResult, UploadImporter, UploadOutcome};

/// 会话内的可变状态（只通过 AppState 访问）
struct SessionState {
    records: Vec<RawRecord>,
    store_version: u64,
    settings: Settings,
    selected_months: BTreeSet<String>,
    derived: DerivedCache,
    generation: u64,
    insight: Option<String>,
}

impl SessionState {
    fn new(settings: Settings) -> Self {
        Self {
            records: Vec::new(),
            store_version: 0,
            settings,
            selected_months: BTreeSet::new(),
            derived: DerivedCache::default(),
            generation: 0,
            insight: None,
        }
    }

    fn view(&mut self) -> DerivedView {
        self.derived.view(
            &self.records,
            self.store_version,
            &self.settings,
            &self.selected_months,
        )
    }

    /// 任何影响筛选结果的变化都让旧洞察失效
    fn bump_generation(&mut self) {
        self.generation += 1;
        self.insight = None;
    }
}

/// 应用状态
///
/// 克隆开销很小（共享同一会话），可在界面层与后台任务之间传递
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<SessionState>>,
    settings_store: Option<Arc<dyn SettingsReader>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    /// 使用给定设置创建（不持久化设置）
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Arc::new(Mutex::new(SessionState::new(settings))),
            settings_store: None,
        }
    }

    /// 从设置存储加载设置，之后的设置变更会写回存储
    pub async fn with_settings_store(store: Arc<dyn SettingsReader>) -> ConfigResult<Self> {
        let settings = store.load_settings().await?;
        info!(
            rounding_mode = %settings.rounding_mode(),
            tombak_threshold = settings.tombak_threshold(),
            "已加载设置"
        );
        Ok(Self {
            session: Arc::new(Mutex::new(SessionState::new(settings))),
            settings_store: Some(store),
        })
    }

    // ==========================================
    // 上传
    // ==========================================

    /// 处理一个上传批次并追加到记录仓
    ///
    /// 抽取期间不持有锁；成功文档的记录作为一个整体追加
    #[instrument(skip(self, importer, documents), fields(documents = documents.len()))]
    pub async fn upload<E>(
        &self,
        importer: &UploadImporter<E>,
        documents: Vec<DocumentHandle>,
    ) -> ImportResult<UploadOutcome>
    where
        E: DocumentExtractor,
    {
        let settings = self.session.lock().await.settings.clone();

        let outcome = importer.import(documents, &settings).await?;

        let mut session = self.session.lock().await;
        session.records.extend(outcome.records.iter().cloned());
        session.store_version += 1;
        session.bump_generation();
        info!(
            batch_id = %outcome.batch_id,
            appended = outcome.records.len(),
            total = session.records.len(),
            store_version = session.store_version,
            "批次记录已追加"
        );

        Ok(outcome)
    }

    // ==========================================
    // 设置
    // ==========================================

    pub async fn settings(&self) -> Settings {
        self.session.lock().await.settings.clone()
    }

    /// 更新设置
    ///
    /// # 规则
    /// - 先校验，非法设置在此处被拒绝，当前设置不变
    /// - 配置了设置存储时先写回存储，写回失败则当前设置不变
    /// - 写回与内存替换在同一把锁内完成，并发更新不会使两者不一致
    /// - 设置变化后派生记录在下次读取时整体重算
    #[instrument(skip(self, draft))]
    pub async fn update_settings(&self, draft: SettingsDraft) -> ConfigResult<Settings> {
        let settings = Settings::try_from(draft)?;

        let mut session = self.session.lock().await;
        if let Some(store) = &self.settings_store {
            store.save_settings(&settings).await?;
        }

        if session.settings != settings {
            session.settings = settings.clone();
            session.bump_generation();
            info!(
                rounding_mode = %settings.rounding_mode(),
                tombak_threshold = settings.tombak_threshold(),
                temp_buckets = ?settings.temp_buckets(),
                temp_tolerance = settings.temp_tolerance(),
                "设置已更新"
            );
        } else {
            debug!("设置未变化");
        }

        Ok(settings)
    }

    // ==========================================
    // 月份筛选
    // ==========================================

    /// 设置月份选择（空集合 = 不筛选）
    pub async fn select_months<I>(&self, months: I)
    where
        I: IntoIterator<Item = String>,
    {
        let selected: BTreeSet<String> = months.into_iter().collect();
        let mut session = self.session.lock().await;
        if session.selected_months != selected {
            debug!(months = ?selected, "月份选择已变更");
            session.selected_months = selected;
            session.bump_generation();
        }
    }

    pub async fn selected_months(&self) -> BTreeSet<String> {
        self.session.lock().await.selected_months.clone()
    }

    // ==========================================
    // 派生输出
    // ==========================================

    pub async fn view(&self) -> DerivedView {
        self.session.lock().await.view()
    }

    /// 当前筛选结果的汇总
    pub async fn summary(&self) -> ProductionSummary {
        let mut session = self.session.lock().await;
        let view = session.view();
        summarize(&view.filtered, &session.settings)
    }

    /// 当前筛选结果的校验报告
    pub async fn validation_report(&self) -> ValidationReport {
        let view = self.view().await;
        RecordValidator::default().validate(&view.filtered)
    }

    /// 导出当前筛选结果为 CSV
    pub async fn export_csv<W: Write>(&self, writer: W) -> Result<usize, ExportError> {
        let view = self.view().await;
        write_csv(writer, &view.filtered)
    }

    pub async fn record_count(&self) -> usize {
        self.session.lock().await.records.len()
    }

    pub async fn store_version(&self) -> u64 {
        self.session.lock().await.store_version
    }

    pub async fn generation(&self) -> u64 {
        self.session.lock().await.generation
    }

    // ==========================================
    // 洞察
    // ==========================================

    pub async fn insight(&self) -> Option<String> {
        self.session.lock().await.insight.clone()
    }

    /// 为当前筛选结果请求洞察
    ///
    /// # 返回
    /// - Some(text): 洞察已生成并写入状态
    /// - None: 服务失败（静默降级）或响应已过期被丢弃
    #[instrument(skip(self, provider))]
    pub async fn refresh_insight<P>(&self, provider: &P) -> Option<String>
    where
        P: InsightProvider + ?Sized,
    {
        let (generation, filtered) = {
            let mut session = self.session.lock().await;
            let view = session.view();
            (session.generation, view.filtered)
        };

        debug!(generation, records = filtered.len(), "请求洞察");
        let result = provider.summarize(&filtered).await;

        let mut session = self.session.lock().await;
        if session.generation != generation {
            debug!(
                requested = generation,
                current = session.generation,
                "洞察响应已过期，丢弃"
            );
            return None;
        }

        match result {
            Ok(text) => {
                session.insight = Some(text.clone());
                Some(text)
            }
            Err(e) => {
                warn!(error = %e, "洞察生成失败，降级为无洞察");
                session.insight = None;
                None
            }
        }
    }
}
