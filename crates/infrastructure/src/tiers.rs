use application::{PublishOptions, TierError, TierPrepareOptions, TierPreparer, TierPublisher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{RawEvent, SignedEvent, TierSelection, UnsignedEvent};
use tokio::sync::broadcast;

/// 不做层级包装的准备器，只保证创建时间与发布流程一致
#[derive(Debug, Default, Clone)]
pub struct PassthroughTierPreparer;

#[async_trait]
impl TierPreparer for PassthroughTierPreparer {
    async fn prepare(
        &self,
        mut event: UnsignedEvent,
        tiers: Option<&TierSelection>,
        options: TierPrepareOptions,
    ) -> Result<Vec<UnsignedEvent>, TierError> {
        if let Some(tiers) = tiers.filter(|tiers| !tiers.is_public()) {
            tracing::debug!(tiers = ?tiers.selected_tiers(), "层级选择未生效，按公开事件处理");
        }
        event.created_at = options.explicit_created_at;
        Ok(vec![event])
    }
}

/// 发往本地订阅者的事件
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub event: RawEvent,
    pub publish_at: Option<DateTime<Utc>>,
}

/// 基于 tokio broadcast 的本地分发器
#[derive(Clone)]
pub struct LocalTierPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

impl LocalTierPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl TierPublisher for LocalTierPublisher {
    async fn publish(&self, event: &SignedEvent, options: PublishOptions) -> Result<(), TierError> {
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(PublishedEvent {
                event: event.raw(),
                publish_at: options.publish_at,
            })
            .map_err(|err| TierError::publish(err.to_string()))?;
        Ok(())
    }
}
