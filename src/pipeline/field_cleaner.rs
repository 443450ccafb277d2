// ==========================================
// 铸造生产记录看板 - 字段清洗器实现
// ==========================================
// 职责: 识别结果中的数值字符串 → f64（容忍单位、千分位、小数逗号）
// ==========================================

use crate::pipeline::pipeline_trait::FieldCleaner as FieldCleanerTrait;

pub struct FieldCleaner;

impl FieldCleanerTrait for FieldCleaner {
    fn parse_number(&self, value: &str) -> Option<f64> {
        let mut digits = String::with_capacity(value.len());
        let mut negative = false;
        let mut seen_digit = false;

        for c in value.trim().chars() {
            match c {
                '0'..='9' => {
                    digits.push(c);
                    seen_digit = true;
                }
                // 第一个数字之前的分隔符属于标签文字（"ca. 612"、"Temp. 612"）
                '.' | ',' if seen_digit => digits.push(c),
                // 负号只认数字之前的第一个
                '-' | '−' if !seen_digit && digits.is_empty() => negative = true,
                _ => {}
            }
        }

        if !seen_digit {
            return None;
        }

        // 末尾分隔符同样不是小数点（"612." / "1.200,"）
        let digits = digits.trim_end_matches(['.', ',']);
        let normalized = normalize_separators(digits)?;
        let parsed = normalized.parse::<f64>().ok()?;
        let signed = if negative { -parsed } else { parsed };

        signed.is_finite().then_some(signed)
    }

    fn clean_text(&self, value: &str) -> String {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// 统一小数点与千分位
///
/// 输入只含数字、'.'、','
fn normalize_separators(digits: &str) -> Option<String> {
    let dots = digits.matches('.').count();
    let commas = digits.matches(',').count();

    match (dots, commas) {
        (0, 0) => Some(digits.to_string()),
        // 单一分隔符且只出现一次 → 小数点
        (1, 0) => Some(digits.to_string()),
        (0, 1) => Some(digits.replace(',', ".")),
        // 单一分隔符出现多次 → 千分位
        (_, 0) => Some(digits.replace('.', "")),
        (0, _) => Some(digits.replace(',', "")),
        // 混合: 最后出现的为小数点，且必须唯一
        _ => {
            let last = digits.rfind(['.', ','])?;
            let decimal = digits[last..].chars().next()?;
            let decimal_count = if decimal == '.' { dots } else { commas };
            if decimal_count != 1 {
                return None;
            }
            let integer_part: String = digits[..last]
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            Some(format!("{}.{}", integer_part, &digits[last + 1..]))
        }
    }
}
