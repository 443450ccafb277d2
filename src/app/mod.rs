// ==========================================
// 铸造生产记录看板 - 应用层
// ==========================================
// 职责: 持有会话状态，连接上传 / 设置 / 筛选 / 洞察
// ==========================================

pub mod report;
pub mod state;

pub use report::render_report;
pub use state::AppState;
