// ==========================================
// 阀门数字孪生大屏 - 快照缓存
// ==========================================
// 状态机: Empty（未加载）→ Loaded（已加载），加载后不再回到 Empty
// 替换语义: 整体原子替换（单次 Arc 赋值），从不逐字段修改
// 失败语义: 重载失败保留旧快照；无旧快照时返回合成快照，从不抛给调用方
// ==========================================

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::aggregate::SnapshotBuilder;
use crate::domain::snapshot::Snapshot;
use crate::mock::mock_snapshot;

pub struct SnapshotCache {
    data_file: PathBuf,
    current: RwLock<Option<Arc<Snapshot>>>,
    last_load: RwLock<Option<DateTime<Local>>>,
    started_at: Instant,
}

impl SnapshotCache {
    pub fn new<P: Into<PathBuf>>(data_file: P) -> Self {
        Self {
            data_file: data_file.into(),
            current: RwLock::new(None),
            last_load: RwLock::new(None),
            started_at: Instant::now(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// 读取快照文档并整体替换缓存
    ///
    /// # 失败语义
    /// - 文档缺失/损坏: 记录日志；已有快照则原样保留并返回，
    ///   否则返回合成快照（不落缓存，保持 Empty 状态）
    ///
    /// 并发触发时后写者胜出（重载最多冗余，不会破坏数据）
    pub fn load(&self) -> Arc<Snapshot> {
        match SnapshotBuilder::read_document(&self.data_file) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *write_lock(&self.current) = Some(snapshot.clone());
                *write_lock(&self.last_load) = Some(Local::now());
                tracing::info!(
                    "快照加载成功: {} (来源: {})",
                    self.data_file.display(),
                    snapshot.data_source
                );
                snapshot
            }
            Err(e) => {
                if let Some(previous) = read_lock(&self.current).clone() {
                    tracing::warn!("快照重载失败，保留旧快照: {}", e);
                    previous
                } else {
                    tracing::warn!("快照加载失败，返回模拟数据: {}", e);
                    tracing::warn!("请先运行 import_excel 生成快照文档");
                    Arc::new(mock_snapshot())
                }
            }
        }
    }

    /// 读取当前快照；未加载时同步触发一次 load()
    pub fn snapshot(&self) -> Arc<Snapshot> {
        if let Some(current) = read_lock(&self.current).clone() {
            return current;
        }
        self.load()
    }

    /// 最近一次成功加载时间
    pub fn last_load(&self) -> Option<DateTime<Local>> {
        *read_lock(&self.last_load)
    }

    /// 服务已运行时长
    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// 快照文档当前是否存在
    pub fn document_exists(&self) -> bool {
        self.data_file.exists()
    }
}

// 锁仅在持锁线程 panic 时中毒；此处数据为整体替换的 Arc，污染后内容仍完整
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
