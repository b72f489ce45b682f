// ==========================================
// 阀门数字孪生大屏 - 领域层
// ==========================================
// 职责: 规范记录、汇总结构、快照类型
// ==========================================

pub mod record;
pub mod snapshot;
pub mod types;

pub use record::{CustomerRecord, OrderRecord, ProductionRecord, QualityRecord};
pub use snapshot::{
    CustomerEntry, LineSummary, OrderSummary, OrderTrendPoint, QualitySummary, QualityTrendPoint,
    Snapshot,
};
pub use types::{CustomerTier, LineStatus, OrderStatus};
