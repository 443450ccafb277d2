// ==========================================
// 铸造生产记录看板 - 分类设置
// ==========================================
// 职责: 取整模式 / Tombak 阈值 / 温度档位 / 容差 / 世纪策略
// 红线: Settings 只能经校验构造，非法值无法进入归一化流程
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{CenturyPolicy, RoundingMode};
use serde::{Deserialize, Serialize};

// ===== 默认值 =====
pub const DEFAULT_TOMBAK_THRESHOLD: f64 = 85.0;
pub const DEFAULT_TOMBAK_BAND: f64 = 13.0;
pub const DEFAULT_TEMP_BUCKETS: [f64; 3] = [570.0, 610.0, 650.0];
pub const DEFAULT_TEMP_TOLERANCE: f64 = 5.0;

// ==========================================
// SettingsDraft - 未校验的设置输入
// ==========================================
// 用途: 界面/配置库/JSON 的原始输入，rounding_mode 保持字符串直到校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsDraft {
    pub rounding_mode: String,
    pub tombak_threshold: f64,
    pub tombak_band: f64,
    pub temp_buckets: Vec<f64>,
    pub temp_tolerance: f64,
    pub century_policy: CenturyPolicy,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::default().to_string(),
            tombak_threshold: DEFAULT_TOMBAK_THRESHOLD,
            tombak_band: DEFAULT_TOMBAK_BAND,
            temp_buckets: DEFAULT_TEMP_BUCKETS.to_vec(),
            temp_tolerance: DEFAULT_TEMP_TOLERANCE,
            century_policy: CenturyPolicy::default(),
        }
    }
}

// ==========================================
// Settings - 已校验的设置（不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SettingsDraft", into = "SettingsDraft")]
pub struct Settings {
    rounding_mode: RoundingMode,
    tombak_threshold: f64,
    tombak_band: f64,
    temp_buckets: Vec<f64>,
    temp_tolerance: f64,
    century_policy: CenturyPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::default(),
            tombak_threshold: DEFAULT_TOMBAK_THRESHOLD,
            tombak_band: DEFAULT_TOMBAK_BAND,
            temp_buckets: DEFAULT_TEMP_BUCKETS.to_vec(),
            temp_tolerance: DEFAULT_TEMP_TOLERANCE,
            century_policy: CenturyPolicy::default(),
        }
    }
}

impl Settings {
    /// 校验并构造设置
    ///
    /// # 规则
    /// - tombak_threshold ∈ [0, 100]
    /// - tombak_band >= 0
    /// - temp_buckets 严格递增（空列表合法：全部记为 unmatched）
    /// - temp_tolerance >= 0
    /// - 所有数值必须有限（拒绝 NaN / ∞）
    pub fn new(
        rounding_mode: RoundingMode,
        tombak_threshold: f64,
        tombak_band: f64,
        temp_buckets: Vec<f64>,
        temp_tolerance: f64,
        century_policy: CenturyPolicy,
    ) -> ConfigResult<Self> {
        if !tombak_threshold.is_finite() || !(0.0..=100.0).contains(&tombak_threshold) {
            return Err(ConfigError::InvalidThreshold(tombak_threshold));
        }
        if !tombak_band.is_finite() || tombak_band < 0.0 {
            return Err(ConfigError::InvalidBand(tombak_band));
        }
        let ascending = temp_buckets.iter().all(|b| b.is_finite())
            && temp_buckets.windows(2).all(|w| w[0] < w[1]);
        if !ascending {
            return Err(ConfigError::NonAscendingBuckets(temp_buckets));
        }
        if !temp_tolerance.is_finite() || temp_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(temp_tolerance));
        }
        validate_century_policy(&century_policy)?;

        Ok(Self {
            rounding_mode,
            tombak_threshold,
            tombak_band,
            temp_buckets,
            temp_tolerance,
            century_policy,
        })
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn tombak_threshold(&self) -> f64 {
        self.tombak_threshold
    }

    pub fn tombak_band(&self) -> f64 {
        self.tombak_band
    }

    /// Messing / Tombak 分界 = threshold - band
    pub fn messing_ceiling(&self) -> f64 {
        self.tombak_threshold - self.tombak_band
    }

    pub fn temp_buckets(&self) -> &[f64] {
        &self.temp_buckets
    }

    pub fn temp_tolerance(&self) -> f64 {
        self.temp_tolerance
    }

    pub fn century_policy(&self) -> CenturyPolicy {
        self.century_policy
    }

    /// 转回草稿（用于界面编辑 / 持久化）
    pub fn to_draft(&self) -> SettingsDraft {
        SettingsDraft::from(self.clone())
    }

    /// 基于当前设置修改后重新校验，返回新的设置
    ///
    /// # 示例
    /// ```
    /// use foundry_dashboard::config::Settings;
    /// let s = Settings::default()
    ///     .update(|d| d.tombak_threshold = 90.0)
    ///     .unwrap();
    /// assert_eq!(s.tombak_threshold(), 90.0);
    /// ```
    pub fn update(&self, edit: impl FnOnce(&mut SettingsDraft)) -> ConfigResult<Self> {
        let mut draft = self.to_draft();
        edit(&mut draft);
        Settings::try_from(draft)
    }
}

fn validate_century_policy(policy: &CenturyPolicy) -> ConfigResult<()> {
    match *policy {
        CenturyPolicy::Fixed { century } if !(10..=99).contains(&century) => Err(
            ConfigError::InvalidCenturyPolicy(format!("century={} 超出 10~99", century)),
        ),
        CenturyPolicy::Pivot { pivot } if pivot > 99 => Err(ConfigError::InvalidCenturyPolicy(
            format!("pivot={} 超出 0~99", pivot),
        )),
        _ => Ok(()),
    }
}

impl TryFrom<SettingsDraft> for Settings {
    type Error = ConfigError;

    fn try_from(draft: SettingsDraft) -> Result<Self, Self::Error> {
        let rounding_mode = draft
            .rounding_mode
            .parse::<RoundingMode>()
            .map_err(ConfigError::UnknownRoundingMode)?;

        Settings::new(
            rounding_mode,
            draft.tombak_threshold,
            draft.tombak_band,
            draft.temp_buckets,
            draft.temp_tolerance,
            draft.century_policy,
        )
    }
}

impl From<Settings> for SettingsDraft {
    fn from(settings: Settings) -> Self {
        Self {
            rounding_mode: settings.rounding_mode.to_string(),
            tombak_threshold: settings.tombak_threshold,
            tombak_band: settings.tombak_band,
            temp_buckets: settings.temp_buckets,
            temp_tolerance: settings.temp_tolerance,
            century_policy: settings.century_policy,
        }
    }
}
