// ==========================================
// 阀门数字孪生大屏 - 前端数据仓库
// ==========================================
// 职责: 并行拉取四域数据、组装视图状态、派生统计
// 降级: 任一请求失败整体回落到模拟数据，大屏不留空白
// ==========================================

use std::sync::Arc;

use crate::aggregate::snapshot_builder::SOURCE_MOCK;
use crate::client::error::ClientResult;
use crate::client::transport::{DataTransport, HttpTransport};
use crate::config::Settings;
use crate::domain::snapshot::{CustomerEntry, LineSummary, Snapshot};
use crate::domain::types::{CustomerTier, LineStatus};
use crate::mock::mock_snapshot;

pub struct DashboardStore {
    transport: Option<Arc<dyn DataTransport>>,
    snapshot: Option<Snapshot>,
}

impl DashboardStore {
    /// 演示模式仓库，不发起任何请求
    pub fn mock() -> Self {
        Self {
            transport: None,
            snapshot: None,
        }
    }

    pub fn with_transport(transport: Arc<dyn DataTransport>) -> Self {
        Self {
            transport: Some(transport),
            snapshot: None,
        }
    }

    /// 按配置选择演示模式或真实后端
    pub fn from_settings(settings: &Settings) -> ClientResult<Self> {
        if settings.use_mock {
            return Ok(Self::mock());
        }
        let transport = HttpTransport::new(&settings.api_base_url, settings.api_timeout)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// 全量加载视图状态
    ///
    /// 四域接口并行拉取后整体组装；演示模式或任一请求失败时
    /// 回落到模拟数据
    pub async fn load(&mut self) {
        let snapshot = match &self.transport {
            None => mock_snapshot(),
            Some(transport) => match Self::fetch_all(transport.as_ref()).await {
                // 无来源标记视为不可用数据
                Ok(snapshot) if snapshot.data_source.is_empty() => {
                    tracing::warn!("快照缺少数据来源标记，回落到模拟数据");
                    mock_snapshot()
                }
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!("数据拉取失败，回落到模拟数据: {}", e);
                    mock_snapshot()
                }
            },
        };
        self.snapshot = Some(snapshot);
    }

    async fn fetch_all(transport: &dyn DataTransport) -> ClientResult<Snapshot> {
        let (orders, production, customers, quality, snapshot) = futures::try_join!(
            transport.fetch_orders(),
            transport.fetch_production(),
            transport.fetch_customers(),
            transport.fetch_quality(),
            transport.fetch_snapshot(),
        )?;

        // 四域以独立接口为准，时间戳与来源取自完整快照
        Ok(Snapshot {
            orders,
            production,
            customers,
            quality,
            update_time: snapshot.update_time,
            data_source: snapshot.data_source,
        })
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// 当前数据是否为模拟来源
    pub fn is_mock(&self) -> bool {
        self.snapshot
            .as_ref()
            .map(|s| s.data_source == SOURCE_MOCK)
            .unwrap_or(true)
    }

    /// 订单完成率（百分比，保留两位）
    pub fn completion_rate(&self) -> f64 {
        let Some(snapshot) = &self.snapshot else {
            return 0.0;
        };
        if snapshot.orders.total == 0 {
            return 0.0;
        }
        let rate = snapshot.orders.completed as f64 / snapshot.orders.total as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }

    /// 客户榜单前 n 名（榜单本身已按金额降序）
    pub fn top_customers(&self, n: usize) -> &[CustomerEntry] {
        let Some(snapshot) = &self.snapshot else {
            return &[];
        };
        let end = n.min(snapshot.customers.len());
        &snapshot.customers[..end]
    }

    /// VIP 客户
    pub fn vip_customers(&self) -> Vec<&CustomerEntry> {
        self.snapshot
            .iter()
            .flat_map(|s| &s.customers)
            .filter(|c| c.level == CustomerTier::VIP)
            .collect()
    }

    /// 告警状态的生产线
    pub fn warning_lines(&self) -> Vec<&LineSummary> {
        self.snapshot
            .iter()
            .flat_map(|s| &s.production)
            .filter(|line| line.status == LineStatus::Warning)
            .collect()
    }

    /// 全部生产线产量合计
    pub fn total_output(&self) -> i64 {
        self.snapshot
            .iter()
            .flat_map(|s| &s.production)
            .map(|line| line.output)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::domain::snapshot::{OrderSummary, QualitySummary};
    use async_trait::async_trait;

    struct FailingTransport;

    #[async_trait]
    impl DataTransport for FailingTransport {
        async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
            Err(ClientError::EndpointMissing)
        }
        async fn fetch_orders(&self) -> ClientResult<OrderSummary> {
            Err(ClientError::EndpointMissing)
        }
        async fn fetch_production(&self) -> ClientResult<Vec<LineSummary>> {
            Err(ClientError::EndpointMissing)
        }
        async fn fetch_customers(&self) -> ClientResult<Vec<CustomerEntry>> {
            Err(ClientError::EndpointMissing)
        }
        async fn fetch_quality(&self) -> ClientResult<QualitySummary> {
            Err(ClientError::EndpointMissing)
        }
    }

    struct FixedTransport(Snapshot);

    #[async_trait]
    impl DataTransport for FixedTransport {
        async fn fetch_snapshot(&self) -> ClientResult<Snapshot> {
            Ok(self.0.clone())
        }
        async fn fetch_orders(&self) -> ClientResult<OrderSummary> {
            Ok(self.0.orders.clone())
        }
        async fn fetch_production(&self) -> ClientResult<Vec<LineSummary>> {
            Ok(self.0.production.clone())
        }
        async fn fetch_customers(&self) -> ClientResult<Vec<CustomerEntry>> {
            Ok(self.0.customers.clone())
        }
        async fn fetch_quality(&self) -> ClientResult<QualitySummary> {
            Ok(self.0.quality.clone())
        }
    }

    fn real_snapshot() -> Snapshot {
        let mut snapshot = mock_snapshot();
        snapshot.data_source = "Excel导入".to_string();
        snapshot.orders.total = 100;
        snapshot.orders.completed = 60;
        snapshot
    }

    #[tokio::test]
    async fn test_演示模式_加载模拟数据() {
        let mut store = DashboardStore::mock();
        store.load().await;

        assert!(store.is_mock());
        assert_eq!(store.snapshot().unwrap().production.len(), 5);
    }

    #[tokio::test]
    async fn test_请求失败_回落模拟数据() {
        let mut store = DashboardStore::with_transport(Arc::new(FailingTransport));
        store.load().await;

        assert!(store.is_mock());
        assert!(store.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_请求成功_使用真实数据() {
        let mut store = DashboardStore::with_transport(Arc::new(FixedTransport(real_snapshot())));
        store.load().await;

        assert!(!store.is_mock());
        assert_eq!(store.snapshot().unwrap().orders.total, 100);
        assert_eq!(store.completion_rate(), 60.0);
    }

    #[tokio::test]
    async fn test_派生视图() {
        let mut store = DashboardStore::mock();
        store.load().await;

        assert_eq!(store.top_customers(3).len(), 3);
        assert_eq!(store.top_customers(100).len(), 10);
        assert_eq!(store.vip_customers().len(), 1);
        assert!(store.warning_lines().is_empty());
        assert_eq!(store.total_output(), 120 + 98 + 115 + 87 + 102);
    }

    #[test]
    fn test_未加载_完成率为零() {
        let store = DashboardStore::mock();
        assert_eq!(store.completion_rate(), 0.0);
    }

    #[test]
    fn test_默认配置_演示模式() {
        let store = DashboardStore::from_settings(&Settings::default()).unwrap();
        assert!(store.transport.is_none());
    }
}
