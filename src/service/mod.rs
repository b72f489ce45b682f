// ==========================================
// 阀门数字孪生大屏 - 服务层
// ==========================================
// 职责: 快照缓存、刷新任务、HTTP 读取接口
// ==========================================

pub mod cache;
pub mod error;
pub mod refresh;
pub mod routes;

pub use cache::SnapshotCache;
pub use error::{ServiceError, ServiceResult};
pub use refresh::{ReloadReason, RefreshHandle};
pub use routes::{ApiResponse, AppState};
