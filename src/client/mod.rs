// ==========================================
// 阀门数字孪生大屏 - 客户端
// ==========================================
// 职责: 读取接口的 HTTP 传输与前端数据仓库
// ==========================================

pub mod error;
pub mod store;
pub mod transport;

pub use error::{ClientError, ClientResult};
pub use store::DashboardStore;
pub use transport::{DataTransport, HttpTransport};
