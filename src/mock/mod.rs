// ==========================================
// 阀门数字孪生大屏 - 模拟数据
// ==========================================
// 职责: 快照文档缺失/演示模式下的合成快照
// 形态: 结构确定，数值随机，来源标签标记为模拟数据
// ==========================================

use chrono::{Duration, Local, SecondsFormat, Utc};
use rand::Rng;

use crate::aggregate::round2;
use crate::aggregate::snapshot_builder::SOURCE_MOCK;
use crate::domain::snapshot::{
    CustomerEntry, LineSummary, OrderSummary, OrderTrendPoint, QualitySummary, QualityTrendPoint,
    Snapshot,
};
use crate::domain::types::{CustomerTier, LineStatus};

/// 近 30 天日期序列（升序，含当日）
fn recent_dates(days: i64) -> Vec<String> {
    let today = Local::now().date_naive();
    (0..days)
        .rev()
        .map(|offset| (today - Duration::days(offset)).to_string())
        .collect()
}

/// 生成合成快照（结构与真实导入一致）
pub fn mock_snapshot() -> Snapshot {
    let mut rng = rand::thread_rng();
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let dates = recent_dates(30);

    let orders = OrderSummary {
        total: 686,
        completed: 458,
        processing: 142,
        pending: 72,
        cancelled: 14,
        trend: dates
            .iter()
            .map(|date| OrderTrendPoint {
                date: date.clone(),
                count: rng.gen_range(10..40),
                amount: rng.gen_range(30_000..80_000) as f64,
            })
            .collect(),
        last_update: now.clone(),
    };

    let production = vec![
        mock_line("闸阀生产线", 120, 96.5, 3.5),
        mock_line("球阀生产线", 98, 94.2, 5.8),
        mock_line("蝶阀生产线", 115, 97.1, 2.9),
        mock_line("截止阀生产线", 87, 95.8, 4.2),
        mock_line("止回阀生产线", 102, 96.3, 3.7),
    ];

    let customers = vec![
        mock_customer("上海华东石化", 1_250_000.0, CustomerTier::VIP, "张经理", 45),
        mock_customer("江苏长江电力", 980_000.0, CustomerTier::A, "李总", 38),
        mock_customer("浙江能源集团", 850_000.0, CustomerTier::A, "王主任", 32),
        mock_customer("安徽电力公司", 720_000.0, CustomerTier::A, "赵工", 28),
        mock_customer("山东石化", 650_000.0, CustomerTier::B, "钱总", 25),
        mock_customer("江西燃气集团", 520_000.0, CustomerTier::B, "孙经理", 22),
        mock_customer("福建化工", 450_000.0, CustomerTier::B, "周总", 18),
        mock_customer("湖南电力", 380_000.0, CustomerTier::B, "", 15),
        mock_customer("河南能源", 320_000.0, CustomerTier::C, "", 12),
        mock_customer("湖北石化", 280_000.0, CustomerTier::C, "", 10),
    ];

    let quality = QualitySummary {
        qualified_rate: 95.8,
        defect_rate: 4.2,
        trend: dates
            .iter()
            .map(|date| QualityTrendPoint {
                date: date.clone(),
                qualified_rate: round2(93.0 + rng.gen::<f64>() * 5.0),
                defect_rate: round2(2.0 + rng.gen::<f64>() * 5.0),
            })
            .collect(),
    };

    Snapshot {
        orders,
        production,
        customers,
        quality,
        update_time: now,
        data_source: SOURCE_MOCK.to_string(),
    }
}

fn mock_line(name: &str, output: i64, qualified: f64, defect: f64) -> LineSummary {
    LineSummary {
        name: name.to_string(),
        output,
        qualified_rate: qualified,
        defect_rate: defect,
        status: LineStatus::from_qualified_rate(qualified),
    }
}

fn mock_customer(
    name: &str,
    amount: f64,
    level: CustomerTier,
    contact: &str,
    order_count: i64,
) -> CustomerEntry {
    CustomerEntry {
        name: name.to_string(),
        amount,
        level,
        contact: contact.to_string(),
        order_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::snapshot_builder::SOURCE_MOCK;

    #[test]
    fn test_模拟快照_结构完整() {
        let snapshot = mock_snapshot();

        assert_eq!(snapshot.data_source, SOURCE_MOCK);
        assert_eq!(snapshot.orders.total, 686);
        assert_eq!(snapshot.orders.trend.len(), 30);
        assert_eq!(snapshot.production.len(), 5);
        assert_eq!(snapshot.customers.len(), 10);
        assert_eq!(snapshot.quality.trend.len(), 30);
    }

    #[test]
    fn test_模拟快照_产线状态派生() {
        let snapshot = mock_snapshot();
        for line in &snapshot.production {
            assert_eq!(line.status, LineStatus::Running, "{} 应为 running", line.name);
        }
    }

    #[test]
    fn test_模拟快照_两率保留两位小数() {
        let snapshot = mock_snapshot();
        for point in &snapshot.quality.trend {
            // 已取整的值再取整应不变
            assert_eq!(round2(point.qualified_rate), point.qualified_rate);
            assert_eq!(round2(point.defect_rate), point.defect_rate);
        }
    }

    #[test]
    fn test_模拟快照_日期升序() {
        let snapshot = mock_snapshot();
        let dates: Vec<&String> = snapshot.orders.trend.iter().map(|p| &p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
