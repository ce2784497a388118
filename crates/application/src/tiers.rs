use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{SignedEvent, TierSelection, Timestamp, UnsignedEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TierError {
    #[error("tier preparation failed: {0}")]
    Preparation(String),
    #[error("tier publish failed: {0}")]
    Publish(String),
}

impl TierError {
    pub fn preparation(message: impl Into<String>) -> Self {
        Self::Preparation(message.into())
    }

    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish(message.into())
    }
}

/// 付费层级准备参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPrepareOptions {
    /// 定时发布时间
    pub publish_at: Option<DateTime<Utc>>,
    /// 准备结果必须沿用的创建时间
    pub explicit_created_at: Timestamp,
}

/// 分发参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishOptions {
    pub publish_at: Option<DateTime<Utc>>,
}

/// 把事件转换或包装为按层级分发的形式，可能产生零个或多个事件
#[async_trait]
pub trait TierPreparer: Send + Sync {
    async fn prepare(
        &self,
        event: UnsignedEvent,
        tiers: Option<&TierSelection>,
        options: TierPrepareOptions,
    ) -> Result<Vec<UnsignedEvent>, TierError>;
}

/// 把已签名事件分发到网络
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TierPublisher: Send + Sync {
    async fn publish(&self, event: &SignedEvent, options: PublishOptions) -> Result<(), TierError>;
}
