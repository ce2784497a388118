//! 应用层实现。
//!
//! 这里提供围绕长帖聚合的用例服务：撰写、草稿检查点、发布，
//! 以及对外部适配器（草稿仓储、签名、付费层级分发）的抽象。

pub mod clock;
pub mod error;
pub mod id_generator;
pub mod repository;
pub mod services;
pub mod signer;
pub mod tiers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ApplicationError;
pub use id_generator::{RandomIdGenerator, DEFAULT_ID_LENGTH};
pub use repository::DraftStore;
pub use services::{
    DraftService, DraftServiceDependencies, PublishService, PublishServiceDependencies,
    PublishThreadRequest, SaveDraftOutcome, SaveDraftRequest, ThreadService,
    ThreadServiceDependencies, DEFAULT_ITEM_SPACING_SECONDS,
};
pub use signer::{EventSigner, SignerError};
pub use tiers::{PublishOptions, TierError, TierPrepareOptions, TierPreparer, TierPublisher};
