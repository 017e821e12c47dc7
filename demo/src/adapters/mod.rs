//! 示例用的内存适配器
//!
//! 每个处理器实例拿到自己的会话（仓储会话、发布会话），变更先暂存，
//! 只有 `commit` 才会写入共享存储；`rollback` 丢弃暂存内容。

mod email;
mod pubsub;
mod repository;

pub use email::{EmailClient, LoggingEmailClient, SentEmail};
pub use pubsub::{InMemoryPubSubClient, Notification, PubSubClient, PubSubSession};
pub use repository::{InMemoryUserRepository, InMemoryUserStore};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// 人为注入的失败点
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailurePlan {
    pub commit: bool,
    pub rollback: bool,
}

/// 提交/回滚调用计数，跨会话共享
#[derive(Debug, Clone, Default)]
pub struct Counters(Arc<CounterState>);

#[derive(Debug, Default)]
struct CounterState {
    commits: AtomicU32,
    rollbacks: AtomicU32,
}

impl Counters {
    pub fn commits(&self) -> u32 {
        self.0.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> u32 {
        self.0.rollbacks.load(Ordering::SeqCst)
    }

    fn committed(&self) {
        self.0.commits.fetch_add(1, Ordering::SeqCst);
    }

    fn rolled_back(&self) {
        self.0.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
}
