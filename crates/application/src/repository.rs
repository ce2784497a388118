use async_trait::async_trait;
use domain::{DraftItem, RepositoryError};

/// 草稿仓储
///
/// 草稿集合是有序的，最近保存的草稿排在最前。每次保存都会整体读出再整体写回。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<DraftItem>, RepositoryError>;

    async fn store_all(&self, drafts: Vec<DraftItem>) -> Result<(), RepositoryError>;
}
