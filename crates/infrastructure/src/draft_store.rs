use application::DraftStore;
use async_trait::async_trait;
use domain::{DraftItem, RepositoryError};
use tokio::sync::RwLock;

/// 内存中的草稿仓储
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    drafts: RwLock<Vec<DraftItem>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drafts(drafts: Vec<DraftItem>) -> Self {
        Self {
            drafts: RwLock::new(drafts),
        }
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn load_all(&self) -> Result<Vec<DraftItem>, RepositoryError> {
        Ok(self.drafts.read().await.clone())
    }

    async fn store_all(&self, drafts: Vec<DraftItem>) -> Result<(), RepositoryError> {
        *self.drafts.write().await = drafts;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_replaces_collection() {
        let store = InMemoryDraftStore::with_drafts(vec![DraftItem::new_thread("a")]);
        assert_eq!(store.load_all().await.unwrap().len(), 1);

        store
            .store_all(vec![DraftItem::new_thread("b"), DraftItem::new_thread("c")])
            .await
            .unwrap();

        let ids: Vec<String> = store.load_all().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
