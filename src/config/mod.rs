// ==========================================
// 阀门数字孪生大屏 - 配置层
// ==========================================
// 职责: 环境变量驱动的服务/导入/客户端配置
// 约定: 所有配置项均有默认值，缺失不报错
// ==========================================

use std::path::PathBuf;
use std::time::Duration;

/// 服务监听端口默认值
pub const DEFAULT_PORT: u16 = 3001;

/// 定时刷新间隔默认值（秒）
pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// 后端请求超时默认值（毫秒）
pub const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;

/// 全局配置
///
/// # 环境变量
/// - PORT: 服务监听端口（默认 3001）
/// - DASHBOARD_DATA_DIR: Excel/CSV 输入目录（默认 data）
/// - DASHBOARD_SNAPSHOT_FILE: 快照文档路径（默认 public/data/realtime-data.json）
/// - DASHBOARD_REFRESH_SECS: 定时刷新间隔秒数（默认 300）
/// - USE_MOCK: 客户端是否使用模拟数据（默认 true）
/// - API_BASE_URL: 客户端后端地址（默认 http://localhost:3001/api）
/// - API_TIMEOUT_MS: 客户端请求超时毫秒数（默认 10000）
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_dir: PathBuf,
    pub snapshot_file: PathBuf,
    pub refresh_interval: Duration,
    pub use_mock: bool,
    pub api_base_url: String,
    pub api_timeout: Duration,
}

impl Settings {
    /// 从环境变量构建配置（所有项带默认值，永不失败）
    pub fn from_env() -> Self {
        Self {
            port: env_parsed("PORT").unwrap_or(DEFAULT_PORT),
            data_dir: std::env::var("DASHBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            snapshot_file: std::env::var("DASHBOARD_SNAPSHOT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/data/realtime-data.json")),
            refresh_interval: Duration::from_secs(
                env_parsed("DASHBOARD_REFRESH_SECS").unwrap_or(DEFAULT_REFRESH_SECS),
            ),
            use_mock: std::env::var("USE_MOCK")
                .map(|v| is_true(&v))
                .unwrap_or(true),
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3001/api".to_string()),
            api_timeout: Duration::from_millis(
                env_parsed("API_TIMEOUT_MS").unwrap_or(DEFAULT_API_TIMEOUT_MS),
            ),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("data"),
            snapshot_file: PathBuf::from("public/data/realtime-data.json"),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            use_mock: true,
            api_base_url: "http://localhost:3001/api".to_string(),
            api_timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_默认配置() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.refresh_interval, Duration::from_secs(300));
        assert!(settings.use_mock);
        assert_eq!(settings.snapshot_file, PathBuf::from("public/data/realtime-data.json"));
    }

    #[test]
    fn test_布尔解析() {
        assert!(is_true("1"));
        assert!(is_true("True"));
        assert!(is_true(" yes "));
        assert!(!is_true("0"));
        assert!(!is_true("false"));
    }
}
