// ==========================================
// 规范化流水线集成测试
// ==========================================
// 测试目标: normalize 全函数性、幂等、分类单调、取整、月份键与筛选
// ==========================================

mod test_helpers;

use std::collections::BTreeSet;

use foundry_dashboard::config::Settings;
use foundry_dashboard::domain::{CenturyPolicy, MaterialClass, RawRecord, TempBucket};
use foundry_dashboard::engine::{available_months, filter_by_months};
use foundry_dashboard::pipeline::{month_key, month_key_with_policy, normalize};
use test_helpers::raw;

fn noisy_inputs() -> Vec<RawRecord> {
    vec![
        raw("1", "05.03.24", "570 °C", "85", "1.236,0 kg"),
        raw("2", "", "", "", ""),
        raw("3", "??", "abc", "-", "kg"),
        raw("4", "1.2.3.4", "∞", "1e9", "12,34,56"),
        raw("5", "31.13.2024", "99999999999999999999", "72", "-40"),
        RawRecord::default(),
    ]
}

#[test]
fn test_normalize_is_total_and_unknown_means_unklar() {
    let settings = Settings::default();
    for input in noisy_inputs() {
        let record = normalize(&input, &settings);
        if record.alloy_value.is_none() {
            assert_eq!(record.material, MaterialClass::Unklar);
        }
        if record.weight_kg.is_none() {
            assert_eq!(record.tonnes, None);
            assert_eq!(record.tonnes_rounded, None);
        }
        if record.temperature_c.is_none() {
            assert_eq!(record.temp_bucket, TempBucket::Unmatched);
        }
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let settings = Settings::default();
    for input in noisy_inputs() {
        assert_eq!(normalize(&input, &settings), normalize(&input, &settings));
    }
}

#[test]
fn test_raising_threshold_never_moves_toward_cu() {
    fn rank(m: MaterialClass) -> u8 {
        match m {
            MaterialClass::Messing => 0,
            MaterialClass::Tombak => 1,
            MaterialClass::Cu => 2,
            MaterialClass::Unklar => 3,
        }
    }

    for alloy in [60.0, 71.9, 72.0, 79.5, 84.99] {
        let input = raw("m", "05.03.24", "570", &alloy.to_string(), "1000");
        let mut previous = None;
        for threshold in [80.0, 85.0, 90.0, 95.0, 100.0] {
            let settings = Settings::default()
                .update(|d| d.tombak_threshold = threshold)
                .unwrap();
            let current = rank(normalize(&input, &settings).material);
            if let Some(prev) = previous {
                assert!(current <= prev, "alloy {} threshold {}", alloy, threshold);
            }
            previous = Some(current);
        }
    }
}

#[test]
fn test_rounding_modes() {
    let standard = Settings::default();
    let always_up = Settings::default()
        .update(|d| d.rounding_mode = "always-up".to_string())
        .unwrap();

    let heavy = raw("r", "05.03.24", "570", "85", "1236");
    assert_eq!(normalize(&heavy, &standard).tonnes_rounded, Some(1.24));
    assert_eq!(normalize(&heavy, &always_up).tonnes_rounded, Some(1.24));

    let light = raw("r", "05.03.24", "570", "85", "1231");
    assert_eq!(normalize(&light, &standard).tonnes_rounded, Some(1.23));
    assert_eq!(normalize(&light, &always_up).tonnes_rounded, Some(1.24));

    // 吨数与取整模式无关
    assert_eq!(
        normalize(&light, &standard).tonnes,
        normalize(&light, &always_up).tonnes
    );
}

#[test]
fn test_tie_resolves_to_earlier_bucket() {
    let settings = Settings::default()
        .update(|d| {
            d.temp_buckets = vec![600.0, 620.0];
            d.temp_tolerance = 10.0;
        })
        .unwrap();
    let record = normalize(&raw("t", "05.03.24", "610", "85", "1000"), &settings);
    assert_eq!(record.temp_bucket, TempBucket::Target(600.0));
}

#[test]
fn test_month_keys() {
    assert_eq!(month_key("05.03.24").as_deref(), Some("2024-03"));
    assert_eq!(month_key("05.03.2024").as_deref(), Some("2024-03"));
    assert_eq!(month_key("bad-date"), None);
    // 不做日期合法性校验
    assert_eq!(month_key("31.13.2024").as_deref(), Some("2024-13"));
    assert_eq!(
        month_key_with_policy("05.03.98", CenturyPolicy::Pivot { pivot: 50 }).as_deref(),
        Some("1998-03")
    );
}

#[test]
fn test_malformed_date_excluded_from_months_but_kept_unfiltered() {
    let settings = Settings::default();
    let records: Vec<_> = [
        raw("a", "05.03.24", "570", "85", "1000"),
        raw("b", "bad-date", "570", "85", "1000"),
        raw("c", "01.01.2023", "570", "85", "1000"),
    ]
    .iter()
    .map(|r| normalize(r, &settings))
    .collect();

    assert_eq!(available_months(&records), vec!["2024-03", "2023-01"]);

    let all = filter_by_months(&records, &BTreeSet::new());
    assert_eq!(all, records);

    let march: BTreeSet<String> = ["2024-03".to_string()].into_iter().collect();
    let filtered = filter_by_months(&records, &march);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id(), "a");
}
