// ==========================================
// 铸造生产记录看板 - 分类服务实现
// ==========================================
// 职责: 吨数取整 / 材质分类 / 温度档位
// ==========================================

use crate::config::Settings;
use crate::domain::types::{MaterialClass, RoundingMode, TempBucket};
use crate::pipeline::pipeline_trait::RecordClassifier as RecordClassifierTrait;

/// 吨数展示精度（小数位）
pub const DISPLAY_PRECISION: i32 = 2;

// 浮点噪声吸收：1.23 * 100 = 123.00000000000001 不应被 ceil 进位，
// 1.005 * 100 = 100.49999999999999 应按 .5 进位；只吸收相对误差在此倍数 ULP 内的偏差
const SNAP_ULPS: f64 = 8.0;

/// 距最近的整数或半整数仅差表示误差时吸附过去，真实余数保持不变
fn snap_representation_error(scaled: f64) -> f64 {
    let nearest_half = (scaled * 2.0).round() / 2.0;
    if (scaled - nearest_half).abs() <= scaled.abs() * f64::EPSILON * SNAP_ULPS {
        nearest_half
    } else {
        scaled
    }
}

pub struct Classifier;

impl RecordClassifierTrait for Classifier {
    fn round_tonnes(&self, tonnes: f64, mode: RoundingMode) -> f64 {
        let scale = 10f64.powi(DISPLAY_PRECISION);
        let scaled = snap_representation_error(tonnes * scale);

        let rounded = match mode {
            // f64::round 为 half away from zero，即商业取整
            RoundingMode::Standard => scaled.round(),
            RoundingMode::AlwaysUp => scaled.ceil(),
        };

        rounded / scale
    }

    fn classify_material(&self, alloy: Option<f64>, settings: &Settings) -> MaterialClass {
        let value = match alloy {
            Some(v) => v,
            None => return MaterialClass::Unklar,
        };

        if value >= settings.tombak_threshold() {
            MaterialClass::Cu
        } else if value >= settings.messing_ceiling() {
            MaterialClass::Tombak
        } else {
            MaterialClass::Messing
        }
    }

    fn assign_temp_bucket(&self, temperature: Option<f64>, settings: &Settings) -> TempBucket {
        let t = match temperature {
            Some(t) => t,
            None => return TempBucket::Unmatched,
        };
        let tolerance = settings.temp_tolerance();

        let mut best: Option<(f64, f64)> = None;
        for &boundary in settings.temp_buckets() {
            let distance = (t - boundary).abs();
            if distance > tolerance {
                continue;
            }
            // 严格小于：距离相同时保留先出现的档位
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((boundary, distance));
            }
        }

        best.map_or(TempBucket::Unmatched, |(boundary, _)| TempBucket::Target(boundary))
    }
}
