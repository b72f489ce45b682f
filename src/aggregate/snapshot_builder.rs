// ==========================================
// 阀门数字孪生大屏 - 快照构建器
// ==========================================
// 职责: 四域汇总 + 时间戳 + 数据来源 → 快照；整体读写快照文档
// 持久化: UTF-8 JSON，2 空格缩进，整文档写入（无增量写）
// ==========================================

use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::Path;

use crate::domain::snapshot::{CustomerEntry, LineSummary, OrderSummary, QualitySummary, Snapshot};
use crate::importer::error::{ImportError, ImportResult};

/// Excel 导入来源标签
pub const SOURCE_EXCEL: &str = "Excel导入";

/// 模拟数据来源标签
pub const SOURCE_MOCK: &str = "模拟数据（演示用）";

pub struct SnapshotBuilder;

impl SnapshotBuilder {
    /// 纯组合: 四域汇总 + updateTime=now + 来源标签
    pub fn build(
        orders: OrderSummary,
        production: Vec<LineSummary>,
        customers: Vec<CustomerEntry>,
        quality: QualitySummary,
        data_source: &str,
    ) -> Snapshot {
        Snapshot {
            orders,
            production,
            customers,
            quality,
            update_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data_source: data_source.to_string(),
        }
    }

    /// 整体写入快照文档（自动创建父目录）
    pub fn write_document(snapshot: &Snapshot, path: &Path) -> ImportResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ImportError::SnapshotWriteError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(path, json).map_err(|e| ImportError::SnapshotWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// 读取并解析快照文档
    pub fn read_document(path: &Path) -> ImportResult<Snapshot> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
