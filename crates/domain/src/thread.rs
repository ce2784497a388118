//! 长帖聚合
//!
//! 长帖由有序的条目组成，每个条目包含一个草稿事件及其附带的资源链接。
//! 插入顺序即发布顺序。

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::event::DraftEvent;
use crate::id_generator::IdGenerator;
use crate::value_objects::{EventId, Kind, PublicKey, Timestamp};

/// 长帖条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadItem {
    pub event: DraftEvent,
    /// 发布时依次追加到正文末尾的链接
    pub urls: Vec<String>,
}

impl ThreadItem {
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.event.content = content.into();
    }

    pub fn add_url(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }
}

/// 检查点中的单个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCheckpointItem {
    /// 编码后的事件（包含ID和签名）
    pub event: String,
    pub urls: Vec<String>,
}

/// 长帖快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCheckpoint {
    pub items: Vec<ThreadCheckpointItem>,
}

/// 长帖聚合根
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    items: Vec<ThreadItem>,
    kind: Kind,
    author: PublicKey,
}

fn local_event_id(ids: &dyn IdGenerator) -> DomainResult<EventId> {
    EventId::new(ids.generate())
}

impl Thread {
    /// 创建长帖，并自动添加一个空白条目
    pub fn new(
        kind: Kind,
        author: PublicKey,
        ids: &dyn IdGenerator,
        now: Timestamp,
    ) -> DomainResult<Self> {
        let mut thread = Self {
            items: Vec::new(),
            kind,
            author,
        };
        thread.new_item(ids, now)?;
        Ok(thread)
    }

    /// 从检查点还原长帖
    ///
    /// 消息类型取自第一个条目；缺少ID的条目会被分配随机ID，便于界面按ID区分条目。
    /// 不做签名校验。
    pub fn from_checkpoint(
        checkpoint: &ThreadCheckpoint,
        author: PublicKey,
        ids: &dyn IdGenerator,
    ) -> DomainResult<Self> {
        let mut items = checkpoint
            .items
            .iter()
            .map(|item| {
                Ok(ThreadItem {
                    event: DraftEvent::decode(&item.event)?,
                    urls: item.urls.clone(),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let kind = items
            .first()
            .map(|item| item.event.kind)
            .ok_or(DomainError::EmptyThread)?;

        for item in items.iter_mut().filter(|item| item.event.id.is_none()) {
            item.event.id = Some(local_event_id(ids)?);
        }

        Ok(Self {
            items,
            kind,
            author,
        })
    }

    /// 追加一个空白条目
    pub fn new_item(
        &mut self,
        ids: &dyn IdGenerator,
        now: Timestamp,
    ) -> DomainResult<&mut ThreadItem> {
        let event = DraftEvent::blank(self.kind, self.author.clone(), local_event_id(ids)?, now);
        self.items.push(ThreadItem {
            event,
            urls: Vec::new(),
        });
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// 删除指定位置的条目，越界时不做任何事并返回 `None`
    pub fn remove_item(&mut self, index: usize) -> Option<ThreadItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// 生成检查点快照，与 [`Thread::from_checkpoint`] 互逆
    pub fn to_checkpoint(&self) -> DomainResult<ThreadCheckpoint> {
        let items = self
            .items
            .iter()
            .map(|item| {
                Ok(ThreadCheckpointItem {
                    event: item.event.encode()?,
                    urls: item.urls.clone(),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(ThreadCheckpoint { items })
    }

    pub fn items(&self) -> &[ThreadItem] {
        &self.items
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut ThreadItem> {
        self.items.get_mut(index)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn author(&self) -> &PublicKey {
        &self.author
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
