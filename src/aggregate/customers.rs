// ==========================================
// 阀门数字孪生大屏 - 客户聚合器
// ==========================================
// 职责: 映射 + 稳定降序排序 + 截取前 20
// 注意: 同名客户不合并，各自独立参与排名（保持既有口径）
// ==========================================

use crate::aggregate::TOP_CUSTOMER_COUNT;
use crate::domain::record::CustomerRecord;
use crate::domain::snapshot::CustomerEntry;

pub struct CustomerAggregator;

impl CustomerAggregator {
    /// 按累计金额降序取前 20 名；金额相同保持输入顺序（稳定排序）
    pub fn aggregate(records: &[CustomerRecord]) -> Vec<CustomerEntry> {
        let mut entries: Vec<CustomerEntry> = records
            .iter()
            .map(|record| CustomerEntry {
                name: record.name.clone(),
                amount: record.cumulative_amount,
                level: record.tier,
                contact: record.contact.clone().unwrap_or_default(),
                order_count: record.order_count,
            })
            .collect();

        // sort_by 为稳定排序，金额相同时保持输入顺序
        entries.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(TOP_CUSTOMER_COUNT);
        entries
    }
}
