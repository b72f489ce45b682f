// ==========================================
// 阀门数字孪生大屏 - 表格数据一次性导入
// ==========================================
// 用法: import_excel
//   读取 DASHBOARD_DATA_DIR 下四个域文件，聚合后写入快照文档
// ==========================================

use valve_dashboard::config::Settings;
use valve_dashboard::importer::{ImportConfig, ImportPipeline};
use valve_dashboard::logging;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let settings = Settings::from_env();

    tracing::info!("📊 开始导入Excel数据...");

    let pipeline = ImportPipeline::new(ImportConfig {
        data_dir: settings.data_dir.clone(),
        output_file: settings.snapshot_file.clone(),
    });

    let snapshot = pipeline.run()?;

    tracing::info!("✅ 导入完成！");
    tracing::info!("   订单总数: {}", snapshot.orders.total);
    tracing::info!("   生产线数: {}", snapshot.production.len());
    tracing::info!("   客户数量: {}", snapshot.customers.len());
    tracing::info!("   质检合格率: {}%", snapshot.quality.qualified_rate);

    Ok(())
}
