// ==========================================
// 阀门数字孪生大屏 - 行规范化器
// ==========================================
// 职责: 原始行（列名 → 单元格文本）→ 四域规范记录
// 列名查找: 中文主列名 → 英文回落列名 → 字面默认值
// 数值解析: 宽松策略，非数值/缺失一律取 0，从不报错
// ==========================================

use chrono::{Local, NaiveDate};
use std::collections::HashMap;

use crate::domain::record::{CustomerRecord, OrderRecord, ProductionRecord, QualityRecord};
use crate::domain::types::{CustomerTier, OrderStatus};
use crate::importer::file_parser::RawRow;

/// 产线名默认值
const UNKNOWN_LINE: &str = "未知生产线";

/// 客户名默认值
const UNKNOWN_CUSTOMER: &str = "未知客户";

pub struct RowNormalizer;

impl RowNormalizer {
    // ==========================================
    // 订单行
    // ==========================================
    pub fn normalize_order(&self, row: &RawRow) -> OrderRecord {
        OrderRecord {
            date: self
                .get_value(row, &["日期", "订单日期", "date"])
                .and_then(|v| parse_date(&v)),
            order_no: self
                .get_value(row, &["订单号", "orderNo"])
                .unwrap_or_default(),
            customer_name: self
                .get_value(row, &["客户名称", "customerName"])
                .unwrap_or_default(),
            amount: self.parse_f64(row, &["金额", "amount"]).max(0.0),
            status: OrderStatus::from_raw(
                &self.get_value(row, &["状态", "status"]).unwrap_or_default(),
            ),
        }
    }

    // ==========================================
    // 生产采样行
    // ==========================================
    pub fn normalize_production(&self, row: &RawRow) -> ProductionRecord {
        ProductionRecord {
            date: self
                .get_value(row, &["日期", "date"])
                .and_then(|v| parse_date(&v)),
            line_name: self
                .get_value(row, &["生产线", "产线", "line"])
                .unwrap_or_else(|| UNKNOWN_LINE.to_string()),
            output: self.parse_i64(row, &["产量", "output"]).max(0),
            qualified_rate: self.parse_f64(row, &["合格率", "qualifiedRate"]),
            defect_rate: self.parse_f64(row, &["不良率", "defectRate"]),
        }
    }

    // ==========================================
    // 客户行
    // ==========================================
    pub fn normalize_customer(&self, row: &RawRow) -> CustomerRecord {
        CustomerRecord {
            name: self
                .get_value(row, &["客户名称", "name"])
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            cumulative_amount: self.parse_f64(row, &["累计金额", "amount"]).max(0.0),
            tier: CustomerTier::from_raw(
                &self.get_value(row, &["等级", "level"]).unwrap_or_default(),
            ),
            contact: self.get_value(row, &["联系人", "contact"]),
            order_count: self.parse_i64(row, &["订单数", "orderCount"]).max(0),
        }
    }

    // ==========================================
    // 质检行
    // ==========================================
    pub fn normalize_quality(&self, row: &RawRow) -> QualityRecord {
        let passed = self
            .get_value(row, &["是否合格", "qualified"])
            .map(|v| matches!(v.as_str(), "是" | "合格" | "true" | "1"))
            .unwrap_or(false);

        // 不良类型仅在不合格时保留；源数据用 "-" 表示无
        let defect_type = if passed {
            None
        } else {
            self.get_value(row, &["不良类型", "defectType"])
                .filter(|v| v != "-")
        };

        QualityRecord {
            // 日期保留源字符串作为分组键，缺失时取当日
            date: self
                .get_value(row, &["日期", "date"])
                .unwrap_or_else(|| Local::now().date_naive().to_string()),
            product_serial: self
                .get_value(row, &["产品编号", "productNo"])
                .unwrap_or_default(),
            passed,
            inspector: self
                .get_value(row, &["检验员", "inspector"])
                .unwrap_or_default(),
            defect_type,
        }
    }

    // ==========================================
    // 字段提取辅助
    // ==========================================

    /// 依次尝试各别名列，返回首个非空值
    fn get_value(&self, row: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 宽松浮点解析，失败取 0
    fn parse_f64(&self, row: &HashMap<String, String>, aliases: &[&str]) -> f64 {
        self.get_value(row, aliases)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// 宽松整数解析，失败取 0（兼容 "120.0" 形式的单元格文本）
    fn parse_i64(&self, row: &HashMap<String, String>, aliases: &[&str]) -> i64 {
        self.get_value(row, aliases)
            .and_then(|v| {
                v.parse::<i64>()
                    .ok()
                    .or_else(|| v.parse::<f64>().ok().map(|f| f as i64))
            })
            .unwrap_or(0)
    }
}

/// 解析日期，兼容 YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_订单行_中文列名() {
        let record = RowNormalizer.normalize_order(&row(&[
            ("日期", "2025-11-01"),
            ("订单号", "SO20251101001"),
            ("客户名称", "上海华东石化"),
            ("金额", "85600"),
            ("状态", "completed"),
        ]));

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 11, 1));
        assert_eq!(record.order_no, "SO20251101001");
        assert_eq!(record.amount, 85600.0);
        assert_eq!(record.status, OrderStatus::Completed);
    }

    #[test]
    fn test_订单行_英文回落列名() {
        let record = RowNormalizer.normalize_order(&row(&[
            ("date", "2025-11-02"),
            ("customerName", "江苏长江电力"),
            ("amount", "65800.5"),
            ("status", "已取消"),
        ]));

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 11, 2));
        assert_eq!(record.amount, 65800.5);
        assert_eq!(record.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_订单行_缺失字段取默认值() {
        let record = RowNormalizer.normalize_order(&row(&[]));

        assert_eq!(record.date, None);
        assert_eq!(record.order_no, "");
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.status, OrderStatus::Pending);
    }

    #[test]
    fn test_订单行_非法金额取零() {
        let record =
            RowNormalizer.normalize_order(&row(&[("金额", "八万五"), ("状态", "pending")]));
        assert_eq!(record.amount, 0.0);
    }

    #[test]
    fn test_订单行_非法日期不报错() {
        let record = RowNormalizer.normalize_order(&row(&[("日期", "不是日期")]));
        assert_eq!(record.date, None);
    }

    #[test]
    fn test_生产行_产线别名与默认值() {
        let record = RowNormalizer.normalize_production(&row(&[
            ("产线", "球阀生产线"),
            ("产量", "98"),
            ("合格率", "94.2"),
            ("不良率", "5.8"),
        ]));
        assert_eq!(record.line_name, "球阀生产线");
        assert_eq!(record.output, 98);

        let record = RowNormalizer.normalize_production(&row(&[("产量", "10")]));
        assert_eq!(record.line_name, "未知生产线");
    }

    #[test]
    fn test_生产行_产量带小数位() {
        // Excel 数值单元格常被读出为 "120.0"
        let record = RowNormalizer.normalize_production(&row(&[("产量", "120.0")]));
        assert_eq!(record.output, 120);
    }

    #[test]
    fn test_客户行_等级与联系人() {
        let record = RowNormalizer.normalize_customer(&row(&[
            ("客户名称", "上海华东石化"),
            ("累计金额", "1250000"),
            ("等级", "VIP"),
            ("联系人", "张经理"),
            ("订单数", "45"),
        ]));
        assert_eq!(record.tier, CustomerTier::VIP);
        assert_eq!(record.contact.as_deref(), Some("张经理"));
        assert_eq!(record.order_count, 45);

        let record = RowNormalizer.normalize_customer(&row(&[("name", "湖南电力")]));
        assert_eq!(record.tier, CustomerTier::C);
        assert_eq!(record.contact, None);
    }

    #[test]
    fn test_质检行_合格判定() {
        for v in ["是", "合格", "true", "1"] {
            let record = RowNormalizer.normalize_quality(&row(&[("是否合格", v)]));
            assert!(record.passed, "{} 应判定为合格", v);
        }

        let record = RowNormalizer.normalize_quality(&row(&[("是否合格", "否")]));
        assert!(!record.passed);
    }

    #[test]
    fn test_质检行_不良类型() {
        // 合格行即使带了不良类型也置空
        let record = RowNormalizer
            .normalize_quality(&row(&[("是否合格", "是"), ("不良类型", "尺寸偏差")]));
        assert_eq!(record.defect_type, None);

        // 不合格行 "-" 视为无
        let record =
            RowNormalizer.normalize_quality(&row(&[("是否合格", "否"), ("不良类型", "-")]));
        assert_eq!(record.defect_type, None);

        let record = RowNormalizer
            .normalize_quality(&row(&[("是否合格", "否"), ("不良类型", "焊接缺陷")]));
        assert_eq!(record.defect_type.as_deref(), Some("焊接缺陷"));
    }

    #[test]
    fn test_质检行_日期缺失取当日() {
        let record = RowNormalizer.normalize_quality(&row(&[("是否合格", "是")]));
        assert_eq!(record.date, Local::now().date_naive().to_string());
    }
}
