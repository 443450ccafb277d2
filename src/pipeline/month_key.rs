// ==========================================
// 铸造生产记录看板 - 月份键提取
// ==========================================
// 规则:
// - 日期必须恰好为 "日.月.年" 三段，否则无月份键
// - 月份补零到两位
// - 两位年份按世纪策略展开（默认 "20" + yy），四位年份原样使用
// - 不做日期合法性校验（"01.13.24" → "2024-13"）
// ==========================================

use crate::domain::types::CenturyPolicy;

/// 使用默认世纪策略提取 "YYYY-MM"
///
/// # 示例
/// ```
/// use foundry_dashboard::pipeline::month_key;
/// assert_eq!(month_key("05.03.24").as_deref(), Some("2024-03"));
/// assert_eq!(month_key("bad-date"), None);
/// ```
pub fn month_key(date: &str) -> Option<String> {
    month_key_with_policy(date, CenturyPolicy::default())
}

/// 使用指定世纪策略提取 "YYYY-MM"
pub fn month_key_with_policy(date: &str, policy: CenturyPolicy) -> Option<String> {
    let parts: Vec<&str> = date.trim().split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let month = parts[1].trim();
    let year = parts[2].trim();

    // 只有两位纯数字才按世纪策略展开（"+4" 不算）
    let year = match year.parse::<u8>() {
        Ok(yy) if year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit()) => {
            policy.expand(yy).to_string()
        }
        _ => year.to_string(),
    };

    Some(format!("{}-{:0>2}", year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_year() {
        assert_eq!(month_key("05.03.24").as_deref(), Some("2024-03"));
    }

    #[test]
    fn test_signed_year_not_expanded() {
        assert_eq!(month_key("05.03.+4").as_deref(), Some("+4-03"));
        assert_eq!(month_key("05.03.-4").as_deref(), Some("-4-03"));
    }

    #[test]
    fn test_four_digit_year() {
        assert_eq!(month_key("05.03.2024").as_deref(), Some("2024-03"));
    }

    #[test]
    fn test_month_zero_padding() {
        assert_eq!(month_key("5.3.2024").as_deref(), Some("2024-03"));
        assert_eq!(month_key("15.11.23").as_deref(), Some("2023-11"));
    }

    #[test]
    fn test_wrong_component_count() {
        assert_eq!(month_key("bad-date"), None);
        assert_eq!(month_key("05.03"), None);
        assert_eq!(month_key("2024-03-05"), None);
        assert_eq!(month_key("05.03.24.1"), None);
        assert_eq!(month_key(""), None);
    }

    #[test]
    fn test_invalid_but_well_formed_passes_through() {
        assert_eq!(month_key("01.13.24").as_deref(), Some("2024-13"));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(month_key(" 05.03.24 ").as_deref(), Some("2024-03"));
    }

    #[test]
    fn test_custom_century_policy() {
        let policy = CenturyPolicy::Pivot { pivot: 50 };
        assert_eq!(
            month_key_with_policy("05.03.98", policy).as_deref(),
            Some("1998-03")
        );
        assert_eq!(
            month_key_with_policy("05.03.24", policy).as_deref(),
            Some("2024-03")
        );
    }
}
