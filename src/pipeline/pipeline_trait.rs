// ==========================================
// 铸造生产记录看板 - 归一化管道 Trait
// ==========================================
// 职责: 定义字段清洗与分类接口（不包含实现）
// 红线: 全部为纯函数，不持有状态，从不返回错误
// ==========================================

use crate::config::Settings;
use crate::domain::types::{MaterialClass, RoundingMode, TempBucket};

// ==========================================
// FieldCleaner Trait
// ==========================================
// 用途: 字符串字段 → 数值（阶段 1）
// 实现者: FieldCleanerImpl
pub trait FieldCleaner: Send + Sync {
    /// 解析带噪声的数值字符串
    ///
    /// # 规则
    /// - 去掉数字、'.'、','、前导负号以外的所有字符
    /// - '.' 与 ',' 同时出现：最后出现的为小数点，其余为千分位
    /// - 只出现一种分隔符且仅一次：视为小数点（逗号转点）
    /// - 同一分隔符出现多次：视为千分位
    ///
    /// # 返回
    /// - Some(f64): 有限数值
    /// - None: 无法恢复（"unknown"）
    fn parse_number(&self, value: &str) -> Option<f64>;

    /// 清洗文本字段（TRIM + 合并连续空白）
    fn clean_text(&self, value: &str) -> String;
}

// ==========================================
// RecordClassifier Trait
// ==========================================
// 用途: 派生字段计算（阶段 2）
// 实现者: ClassifierImpl
pub trait RecordClassifier: Send + Sync {
    /// 吨数取整（2 位小数）
    ///
    /// # 规则
    /// - Standard: 四舍五入（half-up）
    /// - AlwaysUp: 只要有余数就进位
    fn round_tonnes(&self, tonnes: f64, mode: RoundingMode) -> f64;

    /// 材质分类
    ///
    /// # 规则
    /// - alloy 无法解析 → Unklar（优先于任何阈值判断）
    /// - alloy >= threshold → Cu
    /// - threshold - band <= alloy < threshold → Tombak
    /// - 其他 → Messing
    fn classify_material(&self, alloy: Option<f64>, settings: &Settings) -> MaterialClass;

    /// 温度档位
    ///
    /// # 规则
    /// - |t - b| <= tolerance 的档位中取距离最近者
    /// - 距离相同取配置顺序靠前者
    /// - 无命中或温度无法解析 → Unmatched
    fn assign_temp_bucket(&self, temperature: Option<f64>, settings: &Settings) -> TempBucket;
}
