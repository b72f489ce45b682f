// ==========================================
// 阀门数字孪生大屏 - 生产聚合器
// ==========================================
// 职责: 按产线分组（首次出现顺序），产量累计 + 两率算术平均
// 注意: 平均为逐样本简单均值，不按产量加权（保持既有口径）
// ==========================================

use std::collections::HashMap;

use crate::aggregate::round2;
use crate::domain::record::ProductionRecord;
use crate::domain::snapshot::LineSummary;
use crate::domain::types::LineStatus;

struct LineAccumulator {
    name: String,
    output: i64,
    qualified_sum: f64,
    defect_sum: f64,
    count: u32,
}

pub struct ProductionAggregator;

impl ProductionAggregator {
    /// 聚合生产采样记录，输出顺序 = 产线名首次出现顺序
    pub fn aggregate(records: &[ProductionRecord]) -> Vec<LineSummary> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut lines: Vec<LineAccumulator> = Vec::new();

        for record in records {
            let idx = *index.entry(record.line_name.clone()).or_insert_with(|| {
                lines.push(LineAccumulator {
                    name: record.line_name.clone(),
                    output: 0,
                    qualified_sum: 0.0,
                    defect_sum: 0.0,
                    count: 0,
                });
                lines.len() - 1
            });

            let acc = &mut lines[idx];
            acc.output += record.output;
            acc.qualified_sum += record.qualified_rate;
            acc.defect_sum += record.defect_rate;
            acc.count += 1;
        }

        lines
            .into_iter()
            .map(|acc| {
                // count >= 1 由构造保证（每条记录都会累加）
                let avg_qualified = acc.qualified_sum / acc.count as f64;
                let avg_defect = acc.defect_sum / acc.count as f64;
                LineSummary {
                    name: acc.name,
                    output: acc.output,
                    qualified_rate: round2(avg_qualified),
                    defect_rate: round2(avg_defect),
                    // 状态判定用未取整均值
                    status: LineStatus::from_qualified_rate(avg_qualified),
                }
            })
            .collect()
    }
}
