// ==========================================
// 阀门数字孪生大屏 - 领域类型定义
// ==========================================
// 双语状态/等级映射: 固定有限映射表 + 显式默认值
// 未命中一律回落默认值，从不报错
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 序列化格式: lowercase (与快照文档一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,  // 已完成
    Processing, // 处理中
    Pending,    // 待处理
    Cancelled,  // 已取消
}

impl OrderStatus {
    /// 双语状态映射表（中/英），区分大小写
    ///
    /// 未命中的值回落为 Pending
    pub fn from_raw(value: &str) -> Self {
        match value.trim() {
            "completed" | "已完成" => OrderStatus::Completed,
            "processing" | "处理中" => OrderStatus::Processing,
            "pending" | "待处理" => OrderStatus::Pending,
            "cancelled" | "已取消" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==========================================
// 客户等级 (Customer Tier)
// ==========================================
// 驱动前端展示强调程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerTier {
    VIP,
    A,
    B,
    C,
}

impl CustomerTier {
    /// 等级映射表，未命中回落为 C
    pub fn from_raw(value: &str) -> Self {
        match value.trim() {
            "VIP" => CustomerTier::VIP,
            "A" => CustomerTier::A,
            "B" => CustomerTier::B,
            "C" => CustomerTier::C,
            _ => CustomerTier::C,
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerTier::VIP => write!(f, "VIP"),
            CustomerTier::A => write!(f, "A"),
            CustomerTier::B => write!(f, "B"),
            CustomerTier::C => write!(f, "C"),
        }
    }
}

// ==========================================
// 产线运行状态 (Line Status)
// ==========================================
// 派生规则: 平均合格率 >= 90 为 running，否则 warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    Running, // 正常运行
    Warning, // 合格率告警
}

/// 产线状态阈值（平均合格率百分比）
pub const LINE_RUNNING_THRESHOLD: f64 = 90.0;

impl LineStatus {
    pub fn from_qualified_rate(avg_qualified_rate: f64) -> Self {
        if avg_qualified_rate >= LINE_RUNNING_THRESHOLD {
            LineStatus::Running
        } else {
            LineStatus::Warning
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStatus::Running => write!(f, "running"),
            LineStatus::Warning => write!(f, "warning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_订单状态_双语映射() {
        assert_eq!(OrderStatus::from_raw("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_raw("已完成"), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_raw("处理中"), OrderStatus::Processing);
        assert_eq!(OrderStatus::from_raw("已取消"), OrderStatus::Cancelled);
    }

    #[test]
    fn test_订单状态_未命中回落待处理() {
        assert_eq!(OrderStatus::from_raw(""), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_raw("shipped"), OrderStatus::Pending);
        // 区分大小写，未命中即回落
        assert_eq!(OrderStatus::from_raw("Completed"), OrderStatus::Pending);
    }

    #[test]
    fn test_客户等级_未命中回落c() {
        assert_eq!(CustomerTier::from_raw("VIP"), CustomerTier::VIP);
        assert_eq!(CustomerTier::from_raw("A"), CustomerTier::A);
        assert_eq!(CustomerTier::from_raw("vip"), CustomerTier::C);
        assert_eq!(CustomerTier::from_raw(""), CustomerTier::C);
    }

    #[test]
    fn test_产线状态_阈值() {
        assert_eq!(LineStatus::from_qualified_rate(90.0), LineStatus::Running);
        assert_eq!(LineStatus::from_qualified_rate(95.0), LineStatus::Running);
        assert_eq!(LineStatus::from_qualified_rate(89.99), LineStatus::Warning);
    }

    #[test]
    fn test_订单状态_序列化为小写() {
        let s = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(s, "\"completed\"");
        let s = serde_json::to_string(&LineStatus::Warning).unwrap();
        assert_eq!(s, "\"warning\"");
    }
}
