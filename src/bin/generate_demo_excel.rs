// ==========================================
// 阀门数字孪生大屏 - 演示数据生成
// ==========================================
// 用法: generate_demo_excel
//   在 DASHBOARD_DATA_DIR 下生成四个域的演示 Excel 文件
// ==========================================

use chrono::{Duration, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

use valve_dashboard::config::Settings;
use valve_dashboard::logging;

const LINE_NAMES: [&str; 5] = [
    "闸阀生产线",
    "球阀生产线",
    "蝶阀生产线",
    "截止阀生产线",
    "止回阀生产线",
];

const INSPECTORS: [&str; 4] = ["李师傅", "张师傅", "王师傅", "刘师傅"];

const DEFECT_TYPES: [&str; 5] = ["尺寸偏差", "表面划痕", "焊接缺陷", "材料问题", "装配不良"];

const CUSTOMERS: [(&str, f64, &str, &str); 15] = [
    ("上海华东石化", 1_250_000.0, "VIP", "张经理"),
    ("江苏长江电力", 980_000.0, "A", "李总"),
    ("浙江能源集团", 850_000.0, "A", "王主任"),
    ("安徽电力公司", 720_000.0, "A", "赵工"),
    ("山东石化", 650_000.0, "B", "钱总"),
    ("江西燃气集团", 520_000.0, "B", "孙经理"),
    ("福建化工", 450_000.0, "B", "周总"),
    ("湖南电力", 380_000.0, "B", "吴工"),
    ("河南能源", 320_000.0, "C", "郑经理"),
    ("湖北石化", 280_000.0, "C", "冯总"),
    ("四川天然气", 240_000.0, "C", "陈主任"),
    ("重庆水务集团", 210_000.0, "C", "褚工"),
    ("广东核电", 190_000.0, "C", "卫经理"),
    ("广西电网", 160_000.0, "C", "蒋总"),
    ("云南水电", 130_000.0, "C", "沈工"),
];

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let settings = Settings::from_env();
    std::fs::create_dir_all(&settings.data_dir)?;

    tracing::info!("📝 生成演示Excel数据: {}", settings.data_dir.display());

    let today = Local::now().date_naive();

    generate_orders(&settings.data_dir.join("订单数据.xlsx"), today)?;
    generate_production(&settings.data_dir.join("生产数据.xlsx"), today)?;
    generate_customers(&settings.data_dir.join("客户数据.xlsx"))?;
    generate_quality(&settings.data_dir.join("质检数据.xlsx"), today)?;

    tracing::info!("✅ 四个演示文件已生成，可运行 import_excel 导入");
    Ok(())
}

/// 订单数据: 近 30 天，每天 8~20 单
fn generate_orders(path: &Path, today: NaiveDate) -> Result<(), XlsxError> {
    let mut rng = rand::thread_rng();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["日期", "订单号", "客户名称", "金额", "状态"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    // 加权状态分布: 完成为主，少量取消
    let statuses = [
        "completed",
        "completed",
        "completed",
        "processing",
        "processing",
        "pending",
        "cancelled",
    ];

    let mut row = 1u32;
    for offset in (0..30).rev() {
        let date = today - Duration::days(offset);
        let order_count = rng.gen_range(8..=20);
        for seq in 1..=order_count {
            let customer = CUSTOMERS.choose(&mut rng).map(|c| c.0).unwrap_or("未知客户");
            sheet.write_string(row, 0, date.to_string())?;
            sheet.write_string(
                row,
                1,
                format!("SO{}{:03}", date.format("%Y%m%d"), seq),
            )?;
            sheet.write_string(row, 2, customer)?;
            sheet.write_number(row, 3, rng.gen_range(5_000..50_000) as f64)?;
            sheet.write_string(row, 4, *statuses.choose(&mut rng).unwrap_or(&"pending"))?;
            row += 1;
        }
    }

    workbook.save(path)?;
    tracing::info!("   订单数据: {} 条", row - 1);
    Ok(())
}

/// 生产数据: 近 7 天 × 5 条产线
fn generate_production(path: &Path, today: NaiveDate) -> Result<(), XlsxError> {
    let mut rng = rand::thread_rng();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["日期", "生产线", "产量", "合格率", "不良率"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    let mut row = 1u32;
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        for line in LINE_NAMES {
            let qualified = (rng.gen_range(92.0..99.0_f64) * 10.0).round() / 10.0;
            sheet.write_string(row, 0, date.to_string())?;
            sheet.write_string(row, 1, line)?;
            sheet.write_number(row, 2, rng.gen_range(80..130) as f64)?;
            sheet.write_number(row, 3, qualified)?;
            sheet.write_number(row, 4, ((100.0 - qualified) * 10.0).round() / 10.0)?;
            row += 1;
        }
    }

    workbook.save(path)?;
    tracing::info!("   生产数据: {} 条", row - 1);
    Ok(())
}

/// 客户数据: 15 家固定客户
fn generate_customers(path: &Path) -> Result<(), XlsxError> {
    let mut rng = rand::thread_rng();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["客户名称", "累计金额", "等级", "联系人", "订单数"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, (name, amount, tier, contact)) in CUSTOMERS.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *name)?;
        sheet.write_number(row, 1, *amount)?;
        sheet.write_string(row, 2, *tier)?;
        sheet.write_string(row, 3, *contact)?;
        sheet.write_number(row, 4, rng.gen_range(8..50) as f64)?;
    }

    workbook.save(path)?;
    tracing::info!("   客户数据: {} 条", CUSTOMERS.len());
    Ok(())
}

/// 质检数据: 近 7 天，每天 50~80 条抽检记录
fn generate_quality(path: &Path, today: NaiveDate) -> Result<(), XlsxError> {
    let mut rng = rand::thread_rng();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["日期", "产品编号", "是否合格", "检验员", "不良类型"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    let mut row = 1u32;
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let sample_count = rng.gen_range(50..=80);
        for seq in 1..=sample_count {
            // 合格率约 95%
            let passed = rng.gen_range(0..100) < 95;
            sheet.write_string(row, 0, date.to_string())?;
            sheet.write_string(
                row,
                1,
                format!("V{}{:04}", date.format("%Y%m%d"), seq),
            )?;
            sheet.write_string(row, 2, if passed { "是" } else { "否" })?;
            sheet.write_string(row, 3, *INSPECTORS.choose(&mut rng).unwrap_or(&"李师傅"))?;
            sheet.write_string(
                row,
                4,
                if passed {
                    "-"
                } else {
                    *DEFECT_TYPES.choose(&mut rng).unwrap_or(&"尺寸偏差")
                },
            )?;
            row += 1;
        }
    }

    workbook.save(path)?;
    tracing::info!("   质检数据: {} 条", row - 1);
    Ok(())
}
