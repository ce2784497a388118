//! 基础设施层实现。
//!
//! 提供草稿仓储、签名器、付费层级准备与分发的本地适配器，实现应用层定义的接口。

pub mod draft_store;
pub mod signer;
pub mod tiers;

pub use draft_store::InMemoryDraftStore;
pub use signer::DevSigner;
pub use tiers::{LocalTierPublisher, PassthroughTierPreparer, PublishedEvent};
