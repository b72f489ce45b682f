// ==========================================
// 阀门数字孪生大屏 - 订单聚合器
// ==========================================
// 职责: 单趟遍历，状态计数 + 30 天滑动窗口按日趋势
// 不变式: 各状态计数之和 <= total；趋势按日期升序
// ==========================================

use chrono::{Duration, NaiveDate, SecondsFormat, Utc};
use std::collections::BTreeMap;

use crate::aggregate::TREND_WINDOW_DAYS;
use crate::domain::record::OrderRecord;
use crate::domain::snapshot::{OrderSummary, OrderTrendPoint};
use crate::domain::types::OrderStatus;

pub struct OrderAggregator;

impl OrderAggregator {
    /// 聚合订单记录
    ///
    /// # 参数
    /// - records: 规范订单记录
    /// - today: 聚合基准日（滑动窗口下界 = today - 30 天，含端点）
    ///
    /// 日期缺失/无法解析的记录计入总量与状态统计，但不进入趋势
    pub fn aggregate(records: &[OrderRecord], today: NaiveDate) -> OrderSummary {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        if records.is_empty() {
            return OrderSummary::empty(now);
        }

        let window_start = today - Duration::days(TREND_WINDOW_DAYS);

        let mut summary = OrderSummary::empty(now);
        // BTreeMap 天然按日期升序
        let mut trend_map: BTreeMap<NaiveDate, (u32, f64)> = BTreeMap::new();

        for record in records {
            summary.total += 1;
            match record.status {
                OrderStatus::Completed => summary.completed += 1,
                OrderStatus::Processing => summary.processing += 1,
                OrderStatus::Pending => summary.pending += 1,
                OrderStatus::Cancelled => summary.cancelled += 1,
            }

            if let Some(date) = record.date {
                if date >= window_start {
                    let bucket = trend_map.entry(date).or_insert((0, 0.0));
                    bucket.0 += 1;
                    bucket.1 += record.amount;
                }
            }
        }

        summary.trend = trend_map
            .into_iter()
            .map(|(date, (count, amount))| OrderTrendPoint {
                date: date.to_string(),
                count,
                amount,
            })
            .collect();

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(date: Option<&str>, amount: f64, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            date: date.and_then(|d| d.parse().ok()),
            order_no: String::new(),
            customer_name: String::new(),
            amount,
            status,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn test_订单聚合_状态计数与趋势() {
        let records = vec![
            order(Some("2025-11-01"), 100.0, OrderStatus::Completed),
            order(Some("2025-11-01"), 200.0, OrderStatus::Completed),
            order(Some("2025-11-02"), 300.0, OrderStatus::Processing),
        ];

        let summary = OrderAggregator::aggregate(&records, today());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.processing, 1);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.trend.len(), 2);
        assert_eq!(summary.trend[0].date, "2025-11-01");
        assert_eq!(summary.trend[0].count, 2);
        assert_eq!(summary.trend[0].amount, 300.0);
        assert_eq!(summary.trend[1].amount, 300.0);
    }

    #[test]
    fn test_订单聚合_total等于记录数且状态和不超total() {
        let records = vec![
            order(None, 10.0, OrderStatus::Pending),
            order(Some("2025-10-20"), 20.0, OrderStatus::Cancelled),
            order(Some("2020-01-01"), 30.0, OrderStatus::Completed),
        ];

        let summary = OrderAggregator::aggregate(&records, today());

        assert_eq!(summary.total, 3);
        let status_sum =
            summary.completed + summary.processing + summary.pending + summary.cancelled;
        assert!(status_sum <= summary.total);
    }

    #[test]
    fn test_订单聚合_窗口外与无日期记录不进趋势() {
        let records = vec![
            // 窗口外（>30 天前）
            order(Some("2025-09-01"), 100.0, OrderStatus::Completed),
            // 无日期
            order(None, 200.0, OrderStatus::Completed),
            // 窗口内
            order(Some("2025-10-04"), 300.0, OrderStatus::Completed),
        ];

        let summary = OrderAggregator::aggregate(&records, today());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.trend.len(), 1);
        assert_eq!(summary.trend[0].date, "2025-10-04");
    }

    #[test]
    fn test_订单聚合_窗口下界含端点() {
        let records = vec![order(Some("2025-10-04"), 50.0, OrderStatus::Pending)];
        // 2025-11-03 - 30 天 = 2025-10-04
        let summary = OrderAggregator::aggregate(&records, today());
        assert_eq!(summary.trend.len(), 1);
    }

    #[test]
    fn test_订单聚合_空输入返回零值() {
        let summary = OrderAggregator::aggregate(&[], today());
        assert_eq!(summary.total, 0);
        assert!(summary.trend.is_empty());
        assert!(!summary.last_update.is_empty());
    }

    #[test]
    fn test_订单聚合_趋势按日期升序() {
        let records = vec![
            order(Some("2025-11-02"), 1.0, OrderStatus::Pending),
            order(Some("2025-10-28"), 1.0, OrderStatus::Pending),
            order(Some("2025-11-01"), 1.0, OrderStatus::Pending),
        ];

        let summary = OrderAggregator::aggregate(&records, today());
        let dates: Vec<&str> = summary.trend.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-10-28", "2025-11-01", "2025-11-02"]);
    }
}
