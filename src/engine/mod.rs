// ==========================================
// 铸造生产记录看板 - 引擎层
// ==========================================
// 职责: 派生视图、月份筛选、汇总统计、校验视图
// 红线: 只读派生记录，不修改记录仓
// ==========================================

pub mod aggregation;
pub mod derived;
pub mod month_filter;
pub mod validation;

// 重导出核心类型
pub use aggregation::{summarize, GroupTotal, ProductionSummary};
pub use derived::{DerivedCache, DerivedView};
pub use month_filter::{available_months, filter_by_months};
pub use validation::{IssueLevel, RecordValidator, ValidationIssue, ValidationReport};
