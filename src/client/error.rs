// ==========================================
// 阀门数字孪生大屏 - 客户端错误类型
// ==========================================
// 分类: 按 HTTP 状态码归类为可操作的提示级别
// ==========================================

use reqwest::StatusCode;
use thiserror::Error;

/// 客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("登录已过期，请重新登录")]
    AuthExpired,

    #[error("没有权限访问该资源")]
    PermissionDenied,

    #[error("请求的接口不存在")]
    EndpointMissing,

    #[error("服务器错误 ({0})，请稍后重试")]
    ServerError(u16),

    #[error("请求失败 ({0})")]
    HttpStatus(u16),

    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),

    #[error("响应格式异常: {0}")]
    BadEnvelope(String),
}

impl ClientError {
    /// 按状态码分类；调用方保证 status 非 2xx
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ClientError::AuthExpired,
            403 => ClientError::PermissionDenied,
            404 => ClientError::EndpointMissing,
            code if code >= 500 => ClientError::ServerError(code),
            code => ClientError::HttpStatus(code),
        }
    }
}

/// Result 类型别名
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_状态码分类() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED),
            ClientError::AuthExpired
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN),
            ClientError::PermissionDenied
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND),
            ClientError::EndpointMissing
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY),
            ClientError::ServerError(502)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::TOO_MANY_REQUESTS),
            ClientError::HttpStatus(429)
        ));
    }

    #[test]
    fn test_错误提示_中文文案() {
        assert_eq!(ClientError::AuthExpired.to_string(), "登录已过期，请重新登录");
        assert_eq!(
            ClientError::ServerError(503).to_string(),
            "服务器错误 (503)，请稍后重试"
        );
    }
}
