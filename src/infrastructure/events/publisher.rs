//! Event Publisher Implementation
//!
//! 基于 broadcast channel 的状态事件推送

use tokio::sync::broadcast;

use crate::application::ports::{StatusEvent, StatusPublisherPort};

/// 默认通道容量
const DEFAULT_CAPACITY: usize = 100;

/// 事件发布器
///
/// 订阅者处理过慢时会丢失旧事件（`RecvError::Lagged`），不会阻塞朗读流程。
/// 失败由命令处理器记录日志，这里只输出 debug 级别的状态行
pub struct EventPublisher {
    channel: broadcast::Sender<StatusEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { channel: tx }
    }

    /// 订阅状态事件
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.channel.subscribe()
    }
}

impl StatusPublisherPort for EventPublisher {
    fn publish(&self, event: StatusEvent) {
        tracing::debug!(status = %event.message(), tone = ?event.tone(), "Status");

        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish status event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
