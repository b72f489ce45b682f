// ==========================================
// 阀门数字孪生大屏 - 规范记录
// ==========================================
// 职责: 单行表格数据规范化后的中间表示
// 生命周期: 单次导入内构建，聚合后即丢弃
// ==========================================

use chrono::NaiveDate;

use crate::domain::types::{CustomerTier, OrderStatus};

/// 订单记录
///
/// date 为 None 表示源日期缺失或无法解析：
/// 该行仍计入总量与状态统计，但不进入趋势
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub date: Option<NaiveDate>,
    pub order_no: String,
    pub customer_name: String,
    pub amount: f64,
    pub status: OrderStatus,
}

/// 生产采样记录（每行 = 某产线某日一次采样）
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    pub date: Option<NaiveDate>,
    pub line_name: String,
    pub output: i64,
    /// 合格率百分比 0-100
    pub qualified_rate: f64,
    /// 不良率百分比 0-100
    ///
    /// 两率不要求相加为 100（不良分类可能重叠），聚合独立处理
    pub defect_rate: f64,
}

/// 客户记录
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub cumulative_amount: f64,
    pub tier: CustomerTier,
    pub contact: Option<String>,
    pub order_count: i64,
}

/// 质检记录
///
/// date 保留源字符串作为分组键（与快照文档的趋势键一致）
#[derive(Debug, Clone, PartialEq)]
pub struct QualityRecord {
    pub date: String,
    pub product_serial: String,
    pub passed: bool,
    pub inspector: String,
    /// 合格时为 None
    pub defect_type: Option<String>,
}
