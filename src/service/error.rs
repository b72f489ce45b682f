// ==========================================
// 阀门数字孪生大屏 - 服务层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 未处理的内部失败统一以 500 + 错误信息信封返回
// ==========================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 服务层错误类型
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 启动期不可恢复错误（如端口被占用），进程记录日志后终止
    #[error("端口绑定失败: {addr}: {message}")]
    BindError { addr: String, message: String },

    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!("服务器错误: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": format!("服务器内部错误: {}", self),
            })),
        )
            .into_response()
    }
}

/// Result 类型别名
pub type ServiceResult<T> = Result<T, ServiceError>;
