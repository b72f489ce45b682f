// ==========================================
// 阀门数字孪生大屏 - HTTP 读取接口
// ==========================================
// 信封约定: { success, data?, message? }，与前端数据仓库对应
// 读路径无写操作，刷新接口为唯一写入口
// ==========================================

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::snapshot::{CustomerEntry, LineSummary, OrderSummary, QualitySummary, Snapshot};
use crate::service::cache::SnapshotCache;
use crate::{APP_NAME, VERSION};

/// 统一响应信封
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
}

/// 构建完整路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/data", get(get_data))
        .route("/api/orders", get(get_orders))
        .route("/api/production", get(get_production))
        .route("/api/customers", get(get_customers))
        .route("/api/quality", get(get_quality))
        .route("/api/status", get(get_status))
        .route("/api/refresh", post(refresh_data))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / - 服务信息
async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "name": APP_NAME,
        "version": VERSION,
        "endpoints": [
            "GET  /api/data       - 完整快照",
            "GET  /api/orders     - 订单统计",
            "GET  /api/production - 生产线统计",
            "GET  /api/customers  - 客户榜单",
            "GET  /api/quality    - 质检统计",
            "GET  /api/status     - 服务状态",
            "POST /api/refresh    - 手动刷新",
        ],
    }))
}

/// GET /api/data - 完整快照
async fn get_data(State(state): State<AppState>) -> Json<ApiResponse<Arc<Snapshot>>> {
    Json(ApiResponse::ok(state.cache.snapshot()))
}

/// GET /api/orders - 订单统计
async fn get_orders(State(state): State<AppState>) -> Json<ApiResponse<OrderSummary>> {
    Json(ApiResponse::ok(state.cache.snapshot().orders.clone()))
}

/// GET /api/production - 生产线统计
async fn get_production(State(state): State<AppState>) -> Json<ApiResponse<Vec<LineSummary>>> {
    Json(ApiResponse::ok(state.cache.snapshot().production.clone()))
}

/// GET /api/customers - 客户榜单
async fn get_customers(State(state): State<AppState>) -> Json<ApiResponse<Vec<CustomerEntry>>> {
    Json(ApiResponse::ok(state.cache.snapshot().customers.clone()))
}

/// GET /api/quality - 质检统计
async fn get_quality(State(state): State<AppState>) -> Json<ApiResponse<QualitySummary>> {
    Json(ApiResponse::ok(state.cache.snapshot().quality.clone()))
}

/// GET /api/status - 服务运行状态
async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let uptime = state.cache.uptime();
    let (mem_used, mem_total) = process_memory();

    let data_file = if state.cache.document_exists() {
        "已加载"
    } else {
        "不存在"
    };

    let last_update = state
        .cache
        .last_load()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    Json(ApiResponse::ok(json!({
        "status": "running",
        "version": VERSION,
        "uptime": format_uptime(uptime),
        "memory": { "used": mem_used, "total": mem_total },
        "dataFile": data_file,
        "lastUpdate": last_update,
    })))
}

/// POST /api/refresh - 手动触发一次重载并返回新快照
async fn refresh_data(State(state): State<AppState>) -> Json<ApiResponse<Arc<Snapshot>>> {
    tracing::info!("触发数据重载: 手动刷新");
    let cache = state.cache.clone();
    let snapshot = match tokio::task::spawn_blocking(move || cache.load()).await {
        Ok(snapshot) => snapshot,
        // 重载任务被取消时退回当前快照
        Err(_) => state.cache.snapshot(),
    };
    Json(ApiResponse::ok_with_message(snapshot, "数据刷新成功"))
}

/// 兜底 404
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "接口不存在" })),
    )
}

fn format_uptime(uptime: std::time::Duration) -> String {
    let total_minutes = uptime.as_secs() / 60;
    format!("{}小时{}分钟", total_minutes / 60, total_minutes % 60)
}

/// 进程内存占用（当前 / 峰值），读取失败时显示 "-"
fn process_memory() -> (String, String) {
    let status = match std::fs::read_to_string("/proc/self/status") {
        Ok(content) => content,
        Err(_) => return ("-".to_string(), "-".to_string()),
    };

    let read_kb = |key: &str| -> Option<u64> {
        status
            .lines()
            .find(|line| line.starts_with(key))?
            .split_whitespace()
            .nth(1)?
            .parse()
            .ok()
    };

    let to_mb = |kb: Option<u64>| {
        kb.map(|v| format!("{}MB", v / 1024))
            .unwrap_or_else(|| "-".to_string())
    };

    (to_mb(read_kb("VmRSS:")), to_mb(read_kb("VmHWM:")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SnapshotBuilder;
    use crate::aggregate::snapshot_builder::SOURCE_EXCEL;
    use tempfile::TempDir;

    fn state_with_snapshot(dir: &TempDir) -> AppState {
        let path = dir.path().join("realtime-data.json");
        let snapshot = SnapshotBuilder::build(
            OrderSummary::empty("t".to_string()),
            Vec::new(),
            Vec::new(),
            QualitySummary {
                qualified_rate: 95.0,
                defect_rate: 5.0,
                trend: Vec::new(),
            },
            SOURCE_EXCEL,
        );
        SnapshotBuilder::write_document(&snapshot, &path).unwrap();
        AppState {
            cache: Arc::new(SnapshotCache::new(path)),
        }
    }

    #[test]
    fn test_信封_共享快照可序列化() {
        let dir = TempDir::new().unwrap();
        let state = state_with_snapshot(&dir);

        // 信封内为 Arc 共享的快照，序列化结果与裸快照一致
        let json = serde_json::to_value(ApiResponse::ok(state.cache.snapshot())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["dataSource"], SOURCE_EXCEL);
        assert!(json["data"]["updateTime"].is_string());
    }

    #[test]
    fn test_信封_成功时省略message() {
        let json = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 1);
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_数据接口_返回快照() {
        let dir = TempDir::new().unwrap();
        let state = state_with_snapshot(&dir);

        let Json(response) = get_data(State(state)).await;
        assert!(response.success);
        assert_eq!(response.data.unwrap().data_source, SOURCE_EXCEL);
    }

    #[tokio::test]
    async fn test_状态接口_文档存在() {
        let dir = TempDir::new().unwrap();
        let state = state_with_snapshot(&dir);
        state.cache.load();

        let Json(response) = get_status(State(state)).await;
        let data = response.data.unwrap();
        assert_eq!(data["status"], "running");
        assert_eq!(data["dataFile"], "已加载");
        assert_ne!(data["lastUpdate"], "-");
    }

    #[tokio::test]
    async fn test_刷新接口_返回成功消息() {
        let dir = TempDir::new().unwrap();
        let state = state_with_snapshot(&dir);

        let Json(response) = refresh_data(State(state)).await;
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("数据刷新成功"));
    }

    #[test]
    fn test_运行时长_格式化() {
        assert_eq!(
            format_uptime(std::time::Duration::from_secs(3 * 3600 + 25 * 60)),
            "3小时25分钟"
        );
        assert_eq!(format_uptime(std::time::Duration::from_secs(59)), "0小时0分钟");
    }
}
