// ==========================================
// 铸造生产记录看板 - 领域类型定义
// ==========================================
// 职责: 取整模式 / 材质分类 / 温度档位 / 世纪推断策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 取整模式 (Rounding Mode)
// ==========================================
// 封闭枚举: 只有两种模式，未知字符串在配置边界被拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    #[default]
    Standard, // 商业四舍五入（half-up）
    AlwaysUp, // 一律向上取整
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::Standard => write!(f, "standard"),
            RoundingMode::AlwaysUp => write!(f, "always-up"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "commercial" | "kaufmaennisch" | "kaufmännisch" => {
                Ok(RoundingMode::Standard)
            }
            "always-up" | "always_up" | "alwaysup" | "up" | "ceil" => Ok(RoundingMode::AlwaysUp),
            other => Err(other.to_string()),
        }
    }
}

// ==========================================
// 材质分类 (Material Class)
// ==========================================
// 顺序: Messing < Tombak < Cu（按铜含量），Unklar 单列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialClass {
    Messing, // 黄铜
    Tombak,  // 红黄铜
    Cu,      // 纯铜 / 近纯铜
    Unklar,  // 合金值无法解析
}

impl MaterialClass {
    /// 看板展示顺序
    pub const ALL: [MaterialClass; 4] = [
        MaterialClass::Cu,
        MaterialClass::Tombak,
        MaterialClass::Messing,
        MaterialClass::Unklar,
    ];
}

impl fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialClass::Cu => write!(f, "Cu"),
            MaterialClass::Tombak => write!(f, "Tombak"),
            MaterialClass::Messing => write!(f, "Messing"),
            MaterialClass::Unklar => write!(f, "Unklar"),
        }
    }
}

// ==========================================
// 温度档位 (Temperature Bucket)
// ==========================================
// 命中: 目标温度值；未命中: 显式 Unmatched，记录从不丢弃
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempBucket {
    Target(f64),
    Unmatched,
}

impl TempBucket {
    pub fn is_matched(&self) -> bool {
        matches!(self, TempBucket::Target(_))
    }

    /// 用作分组键的标签
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TempBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempBucket::Target(t) => write!(f, "{}", t),
            TempBucket::Unmatched => write!(f, "unmatched"),
        }
    }
}

// ==========================================
// 两位年份的世纪推断 (Century Policy)
// ==========================================
// "24" → 2024 的默认规则是已知的歧义点，这里做成显式可替换的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CenturyPolicy {
    /// 固定世纪前缀：yy → {century}yy
    Fixed { century: u16 },
    /// 滑动窗口：yy <= pivot → 20yy，否则 → 19yy
    Pivot { pivot: u8 },
}

impl Default for CenturyPolicy {
    fn default() -> Self {
        CenturyPolicy::Fixed { century: 20 }
    }
}

impl CenturyPolicy {
    /// 将两位年份展开为四位年份
    pub fn expand(&self, yy: u8) -> u16 {
        let yy = u16::from(yy % 100);
        match *self {
            CenturyPolicy::Fixed { century } => century * 100 + yy,
            CenturyPolicy::Pivot { pivot } => {
                if yy <= u16::from(pivot) {
                    2000 + yy
                } else {
                    1900 + yy
                }
            }
        }
    }
}
