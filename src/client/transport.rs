// ==========================================
// 阀门数字孪生大屏 - 数据传输层
// ==========================================
// 职责: 封装读取接口的 HTTP 访问与信封拆解
// 约定: 服务端信封 { success, data?, message? }
// ==========================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::client::error::{ClientError, ClientResult};
use crate::domain::snapshot::{CustomerEntry, LineSummary, OrderSummary, QualitySummary, Snapshot};

/// 服务端响应信封
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// 数据读取抽象；测试与离线模式可替换实现
#[async_trait]
pub trait DataTransport: Send + Sync {
    async fn fetch_snapshot(&self) -> ClientResult<Snapshot>;
    async fn fetch_orders(&self) -> ClientResult<OrderSummary>;
    async fn fetch_production(&self) -> ClientResult<Vec<LineSummary>>;
    async fn fetch_customers(&self) -> ClientResult<Vec<CustomerEntry>>;
    async fn fetch_quality(&self) -> ClientResult<QualitySummary>;
}

/// 基于 reqwest 的 HTTP 传输
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET + 状态码分类 + 信封拆解
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = ClientError::from_status(status);
            tracing::warn!("请求失败: {} -> {}", url, err);
            return Err(err);
        }

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::BadEnvelope(
                envelope.message.unwrap_or_else(|| "服务端返回失败".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::BadEnvelope("响应缺少 data 字段".to_string()))
    }
}

#[async_trait]
impl DataTransport for HttpTransport {
    async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
        self.get("/data").await
    }

    async fn fetch_orders(&self) -> ClientResult<OrderSummary> {
        self.get("/orders").await
    }

    async fn fetch_production(&self) -> ClientResult<Vec<LineSummary>> {
        self.get("/production").await
    }

    async fn fetch_customers(&self) -> ClientResult<Vec<CustomerEntry>> {
        self.get("/customers").await
    }

    async fn fetch_quality(&self) -> ClientResult<QualitySummary> {
        self.get("/quality").await
    }
}
