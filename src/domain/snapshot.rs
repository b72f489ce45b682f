// ==========================================
// 阀门数字孪生大屏 - 快照类型
// ==========================================
// 职责: 四域汇总 + 元信息组成的不可变快照
// 持久化: UTF-8 JSON，2 空格缩进，整体写入
// 字段名: camelCase（与快照文档一致）
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerTier, LineStatus};

// ==========================================
// 订单汇总 (Order Summary)
// ==========================================

/// 订单趋势点（按日聚合，30 天滑动窗口内）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTrendPoint {
    pub date: String,
    pub count: u32,
    pub amount: f64,
}

/// 订单汇总
///
/// 不变式: completed + processing + pending + cancelled <= total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total: u32,
    pub completed: u32,
    pub processing: u32,
    pub pending: u32,
    pub cancelled: u32,
    /// 按日期升序
    pub trend: Vec<OrderTrendPoint>,
    pub last_update: String,
}

impl OrderSummary {
    /// 空输入占位汇总
    pub fn empty(last_update: String) -> Self {
        Self {
            total: 0,
            completed: 0,
            processing: 0,
            pending: 0,
            cancelled: 0,
            trend: Vec::new(),
            last_update,
        }
    }
}

// ==========================================
// 生产汇总 (Production Summary)
// ==========================================

/// 单产线汇总，每个产线名一条，按首次出现顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub name: String,
    /// 产量累计
    pub output: i64,
    /// 合格率简单算术平均（非产量加权），保留 2 位小数
    pub qualified_rate: f64,
    pub defect_rate: f64,
    pub status: LineStatus,
}

// ==========================================
// 客户汇总 (Customer Summary)
// ==========================================

/// 客户榜单条目（按累计金额降序，前 20 名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEntry {
    pub name: String,
    pub amount: f64,
    pub level: CustomerTier,
    #[serde(default)]
    pub contact: String,
    pub order_count: i64,
}

// ==========================================
// 质检汇总 (Quality Summary)
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityTrendPoint {
    pub date: String,
    pub qualified_rate: f64,
    pub defect_rate: f64,
}

/// 质检汇总
///
/// 空输入时回落 95/5 占位值（文档化占位，非计算值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub qualified_rate: f64,
    pub defect_rate: f64,
    /// 按日期升序，最多保留最近 30 条
    pub trend: Vec<QualityTrendPoint>,
}

// ==========================================
// 快照 (Snapshot)
// ==========================================

/// 全量快照
///
/// 构建后不可变；缓存服务整体替换，从不逐字段修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub orders: OrderSummary,
    pub production: Vec<LineSummary>,
    pub customers: Vec<CustomerEntry>,
    pub quality: QualitySummary,
    pub update_time: String,
    pub data_source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CustomerTier, LineStatus};

    #[test]
    fn test_快照_字段名为camel_case() {
        let snapshot = Snapshot {
            orders: OrderSummary::empty("2025-11-03T00:00:00Z".to_string()),
            production: vec![LineSummary {
                name: "闸阀生产线".to_string(),
                output: 120,
                qualified_rate: 96.5,
                defect_rate: 3.5,
                status: LineStatus::Running,
            }],
            customers: vec![CustomerEntry {
                name: "上海华东石化".to_string(),
                amount: 1250000.0,
                level: CustomerTier::VIP,
                contact: "张经理".to_string(),
                order_count: 45,
            }],
            quality: QualitySummary {
                qualified_rate: 95.8,
                defect_rate: 4.2,
                trend: vec![],
            },
            update_time: "2025-11-03T00:00:00Z".to_string(),
            data_source: "Excel导入".to_string(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["orders"]["lastUpdate"].is_string());
        assert!(json["production"][0]["qualifiedRate"].is_number());
        assert_eq!(json["customers"][0]["orderCount"], 45);
        assert_eq!(json["quality"]["defectRate"], 4.2);
        assert!(json["updateTime"].is_string());
        assert_eq!(json["dataSource"], "Excel导入");
    }

    #[test]
    fn test_客户条目_联系人缺省可解析() {
        // 模拟数据中部分客户无联系人字段
        let entry: CustomerEntry = serde_json::from_str(
            r#"{"name":"湖南电力","amount":380000,"level":"B","orderCount":15}"#,
        )
        .unwrap();
        assert_eq!(entry.contact, "");
        assert_eq!(entry.level, CustomerTier::B);
    }
}
