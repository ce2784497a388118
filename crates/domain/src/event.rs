//! 事件实体定义
//!
//! 事件在发布前后经历三种状态：
//! - [`DraftEvent`]：长帖条目持有的可编辑载荷，可以携带本地随机ID；
//! - [`UnsignedEvent`]：准备发布时生成，ID和签名已清除，时间戳已确定；
//! - [`SignedEvent`]：签名完成，ID和签名必然存在。

use data_encoding::HEXLOWER;
use ring::digest;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{EventId, Kind, PublicKey, Signature, Timestamp};

/// 引用其他事件的标签名
pub const EVENT_TAG: &str = "e";

/// 事件引用的标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMarker {
    /// 长帖的根事件
    Root,
    /// 直接回复的上一条事件
    Reply,
}

impl TagMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMarker::Root => "root",
            TagMarker::Reply => "reply",
        }
    }
}

/// 事件标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    /// 引用事件的标签，中继提示留空
    pub fn event(id: &EventId, marker: TagMarker) -> Self {
        Self(vec![
            EVENT_TAG.to_string(),
            id.as_str().to_string(),
            String::new(),
            marker.as_str().to_string(),
        ])
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// 如果是带指定标记的事件引用，返回被引用的ID
    pub fn event_reference(&self, marker: TagMarker) -> Option<&str> {
        match self.0.as_slice() {
            [name, id, _, m, ..] if name == EVENT_TAG && m == marker.as_str() => {
                Some(id.as_str())
            }
            _ => None,
        }
    }
}

/// 长帖条目持有的草稿事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub pubkey: PublicKey,
    pub kind: Kind,
    pub created_at: Timestamp,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<Signature>,
}

impl DraftEvent {
    /// 创建空白草稿事件
    pub fn blank(kind: Kind, pubkey: PublicKey, id: EventId, created_at: Timestamp) -> Self {
        Self {
            id: Some(id),
            pubkey,
            kind,
            created_at,
            content: String::new(),
            tags: Vec::new(),
            sig: None,
        }
    }

    /// 编码为检查点中使用的持久化形式（包含ID和签名）
    pub fn encode(&self) -> DomainResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::invalid_encoding("event", e.to_string()))
    }

    /// 从持久化形式还原，空字符串的ID和签名视为缺失
    pub fn decode(encoded: &str) -> DomainResult<Self> {
        let mut event: DraftEvent = serde_json::from_str(encoded)
            .map_err(|e| DomainError::invalid_encoding("event", e.to_string()))?;

        if event.id.as_ref().is_some_and(|id| id.as_str().trim().is_empty()) {
            event.id = None;
        }
        if event.sig.as_ref().is_some_and(|sig| sig.as_str().trim().is_empty()) {
            event.sig = None;
        }

        Ok(event)
    }

    /// 生成待签名事件：清除ID和签名，时间戳使用发布时间
    pub fn prepare(&self, created_at: Timestamp) -> UnsignedEvent {
        UnsignedEvent {
            pubkey: self.pubkey.clone(),
            kind: self.kind,
            created_at,
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// 待签名事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedEvent {
    pub pubkey: PublicKey,
    pub kind: Kind,
    pub created_at: Timestamp,
    pub content: String,
    pub tags: Vec<Tag>,
}

impl UnsignedEvent {
    /// 依次把链接追加到正文，以空行分隔
    pub fn append_urls(&mut self, urls: &[String]) {
        if urls.is_empty() {
            return;
        }
        let mut parts = Vec::with_capacity(urls.len() + 1);
        parts.push(self.content.as_str());
        parts.extend(urls.iter().map(String::as_str));
        self.content = parts.join("\n\n");
    }

    /// 引用已签名的事件
    pub fn tag_event(&mut self, target: &SignedEvent, marker: TagMarker) {
        self.tags.push(Tag::event(target.id(), marker));
    }

    /// 规范形式：`[0, pubkey, created_at, kind, tags, content]`
    pub fn canonical_json(&self) -> String {
        serde_json::json!([
            0,
            self.pubkey,
            self.created_at,
            self.kind,
            self.tags,
            self.content
        ])
        .to_string()
    }

    /// 规范形式的 SHA-256 摘要
    pub fn compute_id(&self) -> EventId {
        let hash = digest::digest(&digest::SHA256, self.canonical_json().as_bytes());
        EventId::from_digest(HEXLOWER.encode(hash.as_ref()))
    }

    /// 附上签名，得到最终事件
    pub fn into_signed(self, sig: Signature) -> SignedEvent {
        let id = self.compute_id();
        SignedEvent {
            id,
            pubkey: self.pubkey,
            kind: self.kind,
            created_at: self.created_at,
            content: self.content,
            tags: self.tags,
            sig,
        }
    }
}

/// 已签名事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEvent {
    id: EventId,
    pubkey: PublicKey,
    kind: Kind,
    created_at: Timestamp,
    content: String,
    tags: Vec<Tag>,
    sig: Signature,
}

impl SignedEvent {
    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn pubkey(&self) -> &PublicKey {
        &self.pubkey
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn sig(&self) -> &Signature {
        &self.sig
    }

    /// 查找带指定标记的事件引用
    pub fn referenced_event(&self, marker: TagMarker) -> Option<&str> {
        self.tags.iter().find_map(|tag| tag.event_reference(marker))
    }

    /// 线上传输使用的原始形式
    pub fn raw(&self) -> RawEvent {
        RawEvent {
            id: self.id.clone(),
            pubkey: self.pubkey.clone(),
            created_at: self.created_at,
            kind: self.kind,
            tags: self.tags.clone(),
            content: self.content.clone(),
            sig: self.sig.clone(),
        }
    }
}

/// 原始事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: Timestamp,
    pub kind: Kind,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: Signature,
}
