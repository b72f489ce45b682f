// ==========================================
// 阀门数字孪生大屏 - 质检聚合器
// ==========================================
// 职责: 按日期字符串分组计算合格率/不良率（2 位小数）
// 趋势: 按日期升序，保留最近 30 条
// 空输入: 回落 95/5 占位值，趋势为空
// ==========================================

use std::collections::BTreeMap;

use crate::aggregate::{round2, QUALITY_TREND_CAP};
use crate::domain::record::QualityRecord;
use crate::domain::snapshot::{QualitySummary, QualityTrendPoint};

/// 空输入占位合格率
const PLACEHOLDER_QUALIFIED_RATE: f64 = 95.0;

/// 空输入占位不良率
const PLACEHOLDER_DEFECT_RATE: f64 = 5.0;

pub struct QualityAggregator;

impl QualityAggregator {
    pub fn aggregate(records: &[QualityRecord]) -> QualitySummary {
        if records.is_empty() {
            return QualitySummary {
                qualified_rate: PLACEHOLDER_QUALIFIED_RATE,
                defect_rate: PLACEHOLDER_DEFECT_RATE,
                trend: Vec::new(),
            };
        }

        // 日期键按字符串升序分组；每条记录都会累加 total，桶内 total >= 1
        let mut buckets: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for record in records {
            let bucket = buckets.entry(record.date.clone()).or_insert((0, 0));
            bucket.1 += 1;
            if record.passed {
                bucket.0 += 1;
            }
        }

        let mut total_qualified: u64 = 0;
        let mut total_count: u64 = 0;

        let mut trend: Vec<QualityTrendPoint> = buckets
            .into_iter()
            .map(|(date, (qualified, total))| {
                total_qualified += qualified as u64;
                total_count += total as u64;
                let rate = qualified as f64 / total as f64 * 100.0;
                QualityTrendPoint {
                    date,
                    qualified_rate: round2(rate),
                    defect_rate: round2((total - qualified) as f64 / total as f64 * 100.0),
                }
            })
            .collect();

        // 保留最近 30 条（末尾）
        if trend.len() > QUALITY_TREND_CAP {
            trend.drain(..trend.len() - QUALITY_TREND_CAP);
        }

        QualitySummary {
            qualified_rate: round2(total_qualified as f64 / total_count as f64 * 100.0),
            defect_rate: round2(
                (total_count - total_qualified) as f64 / total_count as f64 * 100.0,
            ),
            trend,
        }
    }
}
