// ==========================================
// 阀门数字孪生大屏 - 数据聚合与刷新服务核心库
// ==========================================
// 数据流: Excel/CSV → 行规范化 → 聚合 → 快照文档 → 缓存服务 → 前端数据仓库
// 技术栈: Rust + Tokio + Axum
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 规范记录与快照类型
pub mod domain;

// 导入层 - 表格文件解析与行规范化
pub mod importer;

// 聚合层 - 四域汇总统计
pub mod aggregate;

// 模拟数据 - 文档缺失/演示模式下的合成快照
pub mod mock;

// 服务层 - 快照缓存与读取接口
pub mod service;

// 客户端 - 数据仓库与传输层
pub mod client;

// 配置层 - 环境变量驱动配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CustomerTier, LineStatus, OrderStatus};

// 领域实体
pub use domain::record::{CustomerRecord, OrderRecord, ProductionRecord, QualityRecord};
pub use domain::snapshot::{
    CustomerEntry, LineSummary, OrderSummary, QualitySummary, Snapshot,
};

// 聚合器
pub use aggregate::{
    CustomerAggregator, OrderAggregator, ProductionAggregator, QualityAggregator, SnapshotBuilder,
};

// 导入管线
pub use importer::{ImportError, ImportPipeline, ImportResult, RowNormalizer};

// 服务层
pub use service::{ReloadReason, ServiceError, SnapshotCache};

// 客户端
pub use client::{ClientError, DashboardStore, DataTransport, HttpTransport};

// 配置
pub use config::Settings;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "阀门数字孪生大屏 - 数据API";
