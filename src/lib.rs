// ==========================================
// 铸造生产记录看板 - 核心库
// ==========================================
// 职责: 生产记录的规范化、分类、月份筛选与汇总
// 技术栈: Rust + SQLite（仅设置存储）
// 系统定位: 看板核心（界面与外部识别服务只通过接口接入）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "de");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 配置层 - 分类设置
pub mod config;

// 处理流水线 - 字段清洗 / 分类 / 月份键
pub mod pipeline;

// 引擎层 - 派生视图 / 筛选 / 汇总 / 校验
pub mod engine;

// 外部服务适配层 - 抽取 / 洞察
pub mod adapters;

// 导入层 - 上传批次
pub mod importer;

// 应用层 - 会话状态
pub mod app;

// 导出
pub mod export;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CenturyPolicy, DocumentHandle, EnrichedRecord, MaterialClass, RawRecord, RoundingMode,
    TempBucket,
};

// 设置
pub use config::{ConfigError, ConfigManager, Settings, SettingsDraft};

// 流水线
pub use pipeline::{month_key, normalize};

// 引擎
pub use engine::{available_months, filter_by_months, summarize, DerivedView, ProductionSummary};

// 外部能力
pub use adapters::{DocumentExtractor, InsightProvider};

// 应用
pub use app::AppState;
pub use importer::{UploadImporter, UploadOutcome};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Gießerei-Protokoll-Dashboard";
