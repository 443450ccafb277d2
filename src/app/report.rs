// ==========================================
// 铸造生产记录看板 - 文本报告
// ==========================================
// 用途: 命令行输出（月份 / 汇总 / 校验提示 / 洞察）
// 说明: 所有文字经 i18n，洞察缺失时显式输出"无洞察"
// ==========================================

use crate::engine::{DerivedView, ProductionSummary, ValidationReport};
use crate::i18n::{t, t_with_args};

/// 渲染文本报告（按行）
pub fn render_report(
    view: &DerivedView,
    summary: &ProductionSummary,
    report: &ValidationReport,
    insight: Option<&str>,
) -> Vec<String> {
    let mut lines = Vec::new();

    let months = if view.available_months.is_empty() {
        "-".to_string()
    } else {
        view.available_months.join(", ")
    };
    lines.push(t_with_args("report.months", &[("months", &months)]));

    lines.push(t_with_args(
        "report.totals",
        &[
            ("count", &summary.record_count.to_string()),
            ("tonnes", &format!("{:.2}", summary.total_tonnes)),
            ("rounded", &format!("{:.2}", summary.total_tonnes_rounded)),
        ],
    ));
    for group in &summary.by_material {
        lines.push(format!(
            "  {:<10} {:>5} {:>10.2} t",
            group.key, group.count, group.tonnes
        ));
    }

    if !report.issues.is_empty() {
        lines.push(t_with_args(
            "report.issues",
            &[("count", &report.issues.len().to_string())],
        ));
        for issue in &report.issues {
            lines.push(format!("  [{}] {}", issue.record_id, issue.message));
        }
    }

    lines.push(match insight {
        Some(text) => text.to_string(),
        None => t("common.no_insight"),
    });

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::record::RawRecord;
    use crate::engine::{summarize, DerivedCache, RecordValidator};
    use crate::i18n::{set_locale, DEFAULT_LOCALE, LOCALE_TEST_LOCK};
    use std::collections::BTreeSet;

    fn render(insight: Option<&str>) -> Vec<String> {
        let settings = Settings::default();
        let raws = vec![
            RawRecord {
                id: "r1".to_string(),
                date: "05.03.24".to_string(),
                temperature: "612".to_string(),
                alloy: "86".to_string(),
                weight: "1500".to_string(),
                ..RawRecord::default()
            },
            RawRecord {
                id: "r2".to_string(),
                date: "kaputt".to_string(),
                ..RawRecord::default()
            },
        ];
        let view = DerivedCache::default().view(&raws, 1, &settings, &BTreeSet::new());
        let summary = summarize(&view.filtered, &settings);
        let report = RecordValidator::default().validate(&view.filtered);
        render_report(&view, &summary, &report, insight)
    }

    #[test]
    fn test_report_follows_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("en");
        let lines = render(None);
        assert_eq!(lines[0], "Months: 2024-03");
        assert_eq!(lines[1], "2 records, 1.50 t (rounded 1.50 t)");
        assert!(lines.iter().any(|l| l.starts_with("  [r2] ")));
        assert_eq!(lines.last().map(String::as_str), Some("No insight available"));

        set_locale("de");
        let lines = render(None);
        assert_eq!(lines[0], "Monate: 2024-03");
        assert_eq!(lines[1], "2 Einträge, 1.50 t (gerundet 1.50 t)");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Keine Auswertung verfügbar")
        );

        set_locale(DEFAULT_LOCALE);
    }

    #[test]
    fn test_report_shows_insight_text() {
        let lines = render(Some("alles im Rahmen"));
        assert_eq!(lines.last().map(String::as_str), Some("alles im Rahmen"));
    }
}
