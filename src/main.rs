// ==========================================
// 阀门数字孪生大屏 - 数据API服务入口
// ==========================================
// 启动流程: 配置 → 日志 → 初始加载 → 刷新任务 → HTTP 服务
// ==========================================

use std::sync::Arc;

use valve_dashboard::service::{refresh, routes, AppState, ServiceError, SnapshotCache};
use valve_dashboard::{config::Settings, logging, APP_NAME, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let settings = Settings::from_env();

    tracing::info!("==========================================");
    tracing::info!("🚀 {} v{}", APP_NAME, VERSION);
    tracing::info!("==========================================");
    tracing::info!("📂 数据文件: {}", settings.snapshot_file.display());
    tracing::info!("⏰ 自动刷新: 每{}秒", settings.refresh_interval.as_secs());

    let cache = Arc::new(SnapshotCache::new(settings.snapshot_file.clone()));

    // 启动即加载一次，文档缺失时服务以模拟数据应答
    cache.load();

    refresh::spawn(cache.clone(), settings.refresh_interval);

    let app = routes::router(AppState {
        cache: cache.clone(),
    });

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServiceError::BindError {
            addr: addr.clone(),
            message: e.to_string(),
        })
        .inspect_err(|e| tracing::error!("启动失败: {}", e))?;

    tracing::info!("🌐 服务地址: http://localhost:{}", settings.port);
    tracing::info!("==========================================");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
        return;
    }
    tracing::info!("收到退出信号，正在关闭服务...");
}
