// ==========================================
// 阀门数字孪生大屏 - 导入管线
// ==========================================
// 职责: 四个固定文件 → 规范化 → 聚合 → 快照文档
// 错误策略: 单域文件缺失/损坏记警告按零行处理，不中断整次导入
// ==========================================

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::aggregate::{
    CustomerAggregator, OrderAggregator, ProductionAggregator, QualityAggregator, SnapshotBuilder,
};
use crate::aggregate::snapshot_builder::SOURCE_EXCEL;
use crate::domain::snapshot::Snapshot;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use crate::importer::row_normalizer::RowNormalizer;

/// 四域固定文件名（主名 .xlsx，同名 .csv 作为回落）
pub const ORDERS_FILE: &str = "订单数据.xlsx";
pub const PRODUCTION_FILE: &str = "生产数据.xlsx";
pub const CUSTOMERS_FILE: &str = "客户数据.xlsx";
pub const QUALITY_FILE: &str = "质检数据.xlsx";

/// 导入管线配置
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Excel/CSV 输入目录
    pub data_dir: PathBuf,
    /// 快照文档输出路径
    pub output_file: PathBuf,
}

pub struct ImportPipeline {
    config: ImportConfig,
    parser: UniversalFileParser,
    normalizer: RowNormalizer,
}

impl ImportPipeline {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            parser: UniversalFileParser,
            normalizer: RowNormalizer,
        }
    }

    /// 执行一次完整导入，返回写入的快照
    pub fn run(&self) -> ImportResult<Snapshot> {
        tracing::info!("开始导入表格数据: {}", self.config.data_dir.display());

        let orders_rows = self.read_rows(ORDERS_FILE);
        let production_rows = self.read_rows(PRODUCTION_FILE);
        let customers_rows = self.read_rows(CUSTOMERS_FILE);
        let quality_rows = self.read_rows(QUALITY_FILE);

        tracing::info!(
            "读取完成: 订单 {} 条, 生产 {} 条, 客户 {} 条, 质检 {} 条",
            orders_rows.len(),
            production_rows.len(),
            customers_rows.len(),
            quality_rows.len()
        );

        let today = Local::now().date_naive();

        let order_records: Vec<_> = orders_rows
            .iter()
            .map(|row| self.normalizer.normalize_order(row))
            .collect();
        let production_records: Vec<_> = production_rows
            .iter()
            .map(|row| self.normalizer.normalize_production(row))
            .collect();
        let customer_records: Vec<_> = customers_rows
            .iter()
            .map(|row| self.normalizer.normalize_customer(row))
            .collect();
        let quality_records: Vec<_> = quality_rows
            .iter()
            .map(|row| self.normalizer.normalize_quality(row))
            .collect();

        let orders = OrderAggregator::aggregate(&order_records, today);
        let production = ProductionAggregator::aggregate(&production_records);
        let customers = CustomerAggregator::aggregate(&customer_records);
        let quality = QualityAggregator::aggregate(&quality_records);

        tracing::info!(
            "订单统计: 总订单 {}, 已完成 {}, 处理中 {}, 待处理 {}",
            orders.total,
            orders.completed,
            orders.processing,
            orders.pending
        );
        tracing::info!("生产线数: {}", production.len());
        tracing::info!("客户榜单: {} 名", customers.len());
        tracing::info!(
            "质检统计: 合格率 {}%, 不良率 {}%",
            quality.qualified_rate,
            quality.defect_rate
        );

        let snapshot = SnapshotBuilder::build(orders, production, customers, quality, SOURCE_EXCEL);
        SnapshotBuilder::write_document(&snapshot, &self.config.output_file)?;

        tracing::info!("快照已写入: {}", self.config.output_file.display());
        Ok(snapshot)
    }

    /// 读取单域文件；缺失或损坏时记警告并返回零行
    fn read_rows(&self, file_name: &str) -> Vec<RawRow> {
        let xlsx_path = self.config.data_dir.join(file_name);
        if xlsx_path.exists() {
            return self.parse_or_empty(&xlsx_path);
        }

        // 同名 .csv 回落
        let csv_path = xlsx_path.with_extension("csv");
        if csv_path.exists() {
            return self.parse_or_empty(&csv_path);
        }

        tracing::warn!("文件不存在，按零行处理: {}", xlsx_path.display());
        Vec::new()
    }

    fn parse_or_empty(&self, path: &Path) -> Vec<RawRow> {
        match self.parser.parse(path) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("文件解析失败，按零行处理: {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
