// ==========================================
// 阀门数字孪生大屏 - 聚合层
// ==========================================
// 职责: 规范记录序列 → 四域汇总统计
// 错误策略: 任何记录序列都不拒绝；空输入返回零值/占位汇总
// ==========================================

pub mod customers;
pub mod orders;
pub mod production;
pub mod quality;
pub mod snapshot_builder;

pub use customers::CustomerAggregator;
pub use orders::OrderAggregator;
pub use production::ProductionAggregator;
pub use quality::QualityAggregator;
pub use snapshot_builder::SnapshotBuilder;

/// 趋势滑动窗口天数
pub const TREND_WINDOW_DAYS: i64 = 30;

/// 质检趋势最大保留条数
pub const QUALITY_TREND_CAP: usize = 30;

/// 客户榜单条数
pub const TOP_CUSTOMER_COUNT: usize = 20;

/// 百分比保留 2 位小数
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
