// ==========================================
// 阀门数字孪生大屏 - 刷新任务
// ==========================================
// 触发源: 定时器（周期刷新）、文档变更（mtime 轮询 + 稳定延迟）
// 汇聚: 所有触发源汇入单消费者队列，串行执行重载
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use crate::service::cache::SnapshotCache;

/// 文档变更轮询周期
const WATCH_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 变更后的稳定等待（写入方可能仍在写）
const WATCH_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// 队列深度；触发挤压时丢弃新触发（重载是幂等的全量操作）
const RELOAD_QUEUE_DEPTH: usize = 16;

/// 重载触发来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    /// 周期定时器
    Timer,
    /// 快照文档变更
    FileChange,
    /// 手动刷新接口
    Manual,
}

impl std::fmt::Display for ReloadReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReloadReason::Timer => write!(f, "定时刷新"),
            ReloadReason::FileChange => write!(f, "文件变更"),
            ReloadReason::Manual => write!(f, "手动刷新"),
        }
    }
}

/// 刷新任务句柄，可从任意处投递触发
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<ReloadReason>,
}

impl RefreshHandle {
    /// 投递一次重载触发；队列满时丢弃（随后必有等效重载）
    pub fn request(&self, reason: ReloadReason) {
        if self.tx.try_send(reason).is_err() {
            tracing::debug!("重载队列已满，丢弃触发: {}", reason);
        }
    }
}

/// 启动刷新任务组: 消费者 + 定时器 + 文档监视器
pub fn spawn(cache: Arc<SnapshotCache>, refresh_interval: Duration) -> RefreshHandle {
    let (tx, rx) = mpsc::channel(RELOAD_QUEUE_DEPTH);
    let handle = RefreshHandle { tx };

    tokio::spawn(consume_reloads(cache.clone(), rx));
    tokio::spawn(timer_task(handle.clone(), refresh_interval));
    tokio::spawn(watch_task(handle.clone(), cache.data_file().to_path_buf()));

    handle
}

/// 单消费者串行执行重载，天然避免并发重载
async fn consume_reloads(cache: Arc<SnapshotCache>, mut rx: mpsc::Receiver<ReloadReason>) {
    while let Some(reason) = rx.recv().await {
        tracing::info!("触发数据重载: {}", reason);
        let cache = cache.clone();
        // 快照读取为同步 IO，移出执行器线程
        let _ = tokio::task::spawn_blocking(move || cache.load()).await;
    }
}

/// 周期定时器；首次触发在一个周期之后（启动时已做初始加载）
async fn timer_task(handle: RefreshHandle, refresh_interval: Duration) {
    let mut ticker = interval_at(Instant::now() + refresh_interval, refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        handle.request(ReloadReason::Timer);
    }
}

/// 文档 mtime 轮询监视器
///
/// 变更检测后等待稳定延迟，期间 mtime 再次变化则继续等待，
/// 避免导入方写到一半时读取
async fn watch_task(handle: RefreshHandle, data_file: PathBuf) {
    let mut last_seen = modified_time(&data_file);
    loop {
        sleep(WATCH_POLL_INTERVAL).await;

        let current = modified_time(&data_file);
        if current == last_seen {
            continue;
        }

        tracing::info!("检测到快照文档变更: {}", data_file.display());
        let mut settled = current;
        loop {
            sleep(WATCH_SETTLE_DELAY).await;
            let again = modified_time(&data_file);
            if again == settled {
                break;
            }
            settled = again;
        }

        last_seen = settled;
        handle.request(ReloadReason::FileChange);
    }
}

fn modified_time(path: &std::path::Path) -> Option<std::time::SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
