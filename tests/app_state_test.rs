// ==========================================
// AppState 集成测试
// ==========================================
// 测试目标:
// - 设置变化 → 派生记录整体重算
// - 月份筛选语义（空选择 = 全部）
// - 洞察过期响应被丢弃，失败静默降级
// ==========================================

mod test_helpers;

use foundry_dashboard::app::AppState;
use foundry_dashboard::config::{ConfigError, Settings};
use foundry_dashboard::domain::{MaterialClass, RoundingMode, TempBucket};
use foundry_dashboard::importer::UploadImporter;
use test_helpers::{pdf, raw, CountingInsight, FailingInsight, MockExtractor, SupersededInsight};

async fn loaded_state() -> AppState {
    let state = AppState::default();
    let importer = UploadImporter::new(MockExtractor::new().with_document(
        "protokoll.pdf",
        vec![
            raw("m1", "05.03.24", "571", "80", "1231"),
            raw("m2", "17.3.2024", "608", "86", "2000"),
            raw("f1", "01.02.24", "650", "70", "950"),
            raw("x1", "bad-date", "630", "n/a", "??"),
        ],
    ));
    state
        .upload(&importer, vec![pdf("protokoll.pdf")])
        .await
        .unwrap();
    state
}

#[tokio::test]
async fn test_available_months_and_empty_filter() {
    let state = loaded_state().await;
    let view = state.view().await;

    assert_eq!(*view.available_months, vec!["2024-03", "2024-02"]);
    // 空选择 = 不筛选，包括无月份键的记录
    assert_eq!(view.filtered.len(), 4);
    assert!(view.filtered.iter().any(|r| r.id() == "x1"));
}

#[tokio::test]
async fn test_month_selection_filters() {
    let state = loaded_state().await;
    state.select_months(vec!["2024-03".to_string()]).await;

    let view = state.view().await;
    let ids: Vec<&str> = view.filtered.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    // 可选月份始终来自全量数据
    assert_eq!(view.available_months.len(), 2);
}

#[tokio::test]
async fn test_settings_change_reclassifies() {
    let state = loaded_state().await;
    let before = state.view().await;
    let m1 = before.enriched.iter().find(|r| r.id() == "m1").unwrap();
    assert_eq!(m1.material, MaterialClass::Tombak);
    assert_eq!(m1.tonnes_rounded, Some(1.23));

    let mut draft = state.settings().await.to_draft();
    draft.tombak_threshold = 80.0;
    draft.rounding_mode = "always-up".to_string();
    let updated = state.update_settings(draft).await.unwrap();
    assert_eq!(updated.rounding_mode(), RoundingMode::AlwaysUp);

    let after = state.view().await;
    let m1 = after.enriched.iter().find(|r| r.id() == "m1").unwrap();
    assert_eq!(m1.material, MaterialClass::Cu);
    assert_eq!(m1.tonnes_rounded, Some(1.24));

    // 无法解析的合金值在任何设置下都是 Unklar
    let x1 = after.enriched.iter().find(|r| r.id() == "x1").unwrap();
    assert_eq!(x1.material, MaterialClass::Unklar);
    assert_eq!(x1.tonnes, None);
}

#[tokio::test]
async fn test_invalid_settings_rejected_state_unchanged() {
    let state = loaded_state().await;
    let mut draft = state.settings().await.to_draft();
    draft.temp_buckets = vec![650.0, 570.0];

    let result = state.update_settings(draft).await;
    assert!(matches!(result, Err(ConfigError::NonAscendingBuckets(_))));
    assert_eq!(state.settings().await, Settings::default());
}

#[tokio::test]
async fn test_bucket_tolerance_change() {
    let state = loaded_state().await;
    let view = state.view().await;
    let x1 = view.enriched.iter().find(|r| r.id() == "x1").unwrap();
    assert_eq!(x1.temp_bucket, TempBucket::Unmatched);

    let mut draft = state.settings().await.to_draft();
    draft.temp_tolerance = 20.0;
    state.update_settings(draft).await.unwrap();

    let view = state.view().await;
    let x1 = view.enriched.iter().find(|r| r.id() == "x1").unwrap();
    // 630 与 610、650 等距 → 取配置顺序靠前者
    assert_eq!(x1.temp_bucket, TempBucket::Target(610.0));
}

#[tokio::test]
async fn test_insight_applied_when_current() {
    let state = loaded_state().await;
    let text = state.refresh_insight(&CountingInsight).await;
    assert_eq!(text.as_deref(), Some("4 records"));
    assert_eq!(state.insight().await.as_deref(), Some("4 records"));

    // 筛选变化后旧洞察失效
    state.select_months(vec!["2024-02".to_string()]).await;
    assert_eq!(state.insight().await, None);
}

#[tokio::test]
async fn test_stale_insight_dropped() {
    let state = loaded_state().await;
    let provider = SupersededInsight {
        state: state.clone(),
        months: vec!["2024-02".to_string()],
    };

    let text = state.refresh_insight(&provider).await;
    assert_eq!(text, None);
    assert_eq!(state.insight().await, None);

    // 针对新筛选结果重新请求
    let text = state.refresh_insight(&CountingInsight).await;
    assert_eq!(text.as_deref(), Some("1 records"));
}

#[tokio::test]
async fn test_insight_failure_degrades_silently() {
    let state = loaded_state().await;
    assert_eq!(state.refresh_insight(&FailingInsight).await, None);
    assert_eq!(state.insight().await, None);
    // 其他功能不受影响
    assert_eq!(state.summary().await.record_count, 4);
}

#[tokio::test]
async fn test_summary_and_validation_follow_filter() {
    let state = loaded_state().await;
    state.select_months(vec!["2024-03".to_string()]).await;

    let summary = state.summary().await;
    assert_eq!(summary.record_count, 2);
    assert!((summary.total_tonnes - 3.231).abs() < 1e-9);

    state.select_months(Vec::<String>::new()).await;
    let report = state.validation_report().await;
    assert!(report.issues.iter().any(|i| i.record_id == "x1"));
    assert!(report.issues.iter().all(|i| i.record_id != "m2"));
}

#[tokio::test]
async fn test_unchanged_settings_reuse_cache() {
    let state = loaded_state().await;
    let first = state.view().await;
    let settings = state.settings().await;
    state.update_settings(settings.to_draft()).await.unwrap();
    let second = state.view().await;
    assert!(std::sync::Arc::ptr_eq(&first.enriched, &second.enriched));
}

#[tokio::test]
async fn test_export_follows_filter() {
    let state = loaded_state().await;
    state.select_months(vec!["2024-02".to_string()]).await;

    let mut buf = Vec::new();
    let rows = state.export_csv(&mut buf).await.unwrap();
    assert_eq!(rows, 1);

    let text = String::from_utf8(buf).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("f1,01.02.24,2024-02"));
}
