//! 长帖发布服务
//!
//! 按顺序把长帖条目发布为一串相互引用的事件：第一条成为根事件，
//! 之后每条都引用根事件，并回复上一条（根事件之后的第一条只引用根事件）。
//! 时间戳从发布时间开始按固定间隔递增，保证客户端按时间排序时顺序确定。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{DomainError, SignedEvent, TagMarker, Thread, TierSelection, Timestamp};
use tracing::{debug, info};

use crate::{
    clock::Clock,
    error::ApplicationError,
    signer::EventSigner,
    tiers::{PublishOptions, TierPrepareOptions, TierPreparer, TierPublisher},
};

/// 相邻条目之间的默认时间间隔（秒）
pub const DEFAULT_ITEM_SPACING_SECONDS: i64 = 5;

#[derive(Debug, Clone, Default)]
pub struct PublishThreadRequest {
    /// 定时发布时间，为空时立即发布
    pub publish_at: Option<DateTime<Utc>>,
    /// 付费层级选择，只对非普通文本类型生效
    pub tiers: Option<TierSelection>,
}

pub struct PublishServiceDependencies {
    pub signer: Arc<dyn EventSigner>,
    pub tier_preparer: Arc<dyn TierPreparer>,
    pub tier_publisher: Arc<dyn TierPublisher>,
    pub clock: Arc<dyn Clock>,
}

pub struct PublishService {
    deps: PublishServiceDependencies,
    item_spacing_seconds: i64,
}

impl PublishService {
    pub fn new(deps: PublishServiceDependencies) -> Self {
        Self {
            deps,
            item_spacing_seconds: DEFAULT_ITEM_SPACING_SECONDS,
        }
    }

    /// 设置相邻条目的时间间隔，必须大于 0 秒，否则时间戳不再严格递增
    pub fn with_item_spacing(mut self, seconds: i64) -> Result<Self, ApplicationError> {
        if seconds <= 0 {
            return Err(DomainError::invalid_argument(
                "item_spacing_seconds",
                format!("must be greater than 0, got {seconds}"),
            )
            .into());
        }
        self.item_spacing_seconds = seconds;
        Ok(self)
    }

    /// 发布长帖，返回根事件
    ///
    /// 条目逐个处理，每一步都依赖上一步已签名事件的ID，因此不能并行。
    /// 中途失败不会回滚已经发布的事件。调用方的长帖不会被修改。
    pub async fn publish_thread(
        &self,
        thread: &Thread,
        request: PublishThreadRequest,
    ) -> Result<SignedEvent, ApplicationError> {
        if thread.is_empty() {
            return Err(ApplicationError::EmptyThread);
        }

        let basic = thread.kind().is_text_note();
        let mut publish_time =
            Timestamp::from(request.publish_at.unwrap_or_else(|| self.deps.clock.now()));

        info!(
            thread_items = thread.len(),
            kind = %thread.kind(),
            start = %publish_time,
            scheduled = request.publish_at.is_some(),
            "开始发布长帖"
        );

        let mut root: Option<SignedEvent> = None;
        let mut last: Option<SignedEvent> = None;

        for (index, item) in thread.items().iter().enumerate() {
            let mut event = item.event.prepare(publish_time);
            event.append_urls(&item.urls);

            publish_time = publish_time.plus_secs(self.item_spacing_seconds);

            if let Some(root) = &root {
                event.tag_event(root, TagMarker::Root);
                if let Some(last) = &last {
                    event.tag_event(last, TagMarker::Reply);
                }
            }

            let for_publish = if basic {
                event
            } else {
                let options = TierPrepareOptions {
                    publish_at: request.publish_at,
                    explicit_created_at: event.created_at,
                };
                self.deps
                    .tier_preparer
                    .prepare(event, request.tiers.as_ref(), options)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(ApplicationError::EventPreparationFailed { index })?
            };

            let signed = self.deps.signer.sign(for_publish).await?;
            let raw = signed.raw();
            debug!(index, event_id = %raw.id, created_at = %raw.created_at, "条目已签名");

            let current: &SignedEvent = if root.is_none() {
                root.insert(signed)
            } else {
                last.insert(signed)
            };

            self.deps
                .tier_publisher
                .publish(
                    current,
                    PublishOptions {
                        publish_at: request.publish_at,
                    },
                )
                .await?;
        }

        let root = root.ok_or(ApplicationError::EmptyThread)?;
        info!(event_id = %root.id(), "长帖发布完成");
        Ok(root)
    }
}
