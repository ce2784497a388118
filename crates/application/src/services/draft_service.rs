use std::sync::Arc;

use domain::{DomainError, DraftCheckpoint, DraftItem, IdGenerator, PublicKey, Thread};
use tracing::{debug, error, info};

use crate::{clock::Clock, error::ApplicationError, repository::DraftStore};

#[derive(Debug, Clone)]
pub struct SaveDraftRequest {
    /// 用户手动保存；为 false 时表示自动保存
    pub manually_saved: bool,
    /// 已有的草稿，首次保存时为空
    pub draft: Option<DraftItem>,
}

/// 保存草稿的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDraftOutcome {
    Saved(DraftItem),
    /// 自动保存时内容与最新检查点一致，没有写入
    Unchanged,
}

pub struct DraftServiceDependencies {
    pub draft_store: Arc<dyn DraftStore>,
    pub clock: Arc<dyn Clock>,
    pub id_generator: Arc<dyn IdGenerator>,
}

/// 草稿检查点管理
///
/// 同一草稿的保存请求需要由调用方串行化，仓储读写之间没有加锁。
pub struct DraftService {
    deps: DraftServiceDependencies,
}

impl DraftService {
    pub fn new(deps: DraftServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn save_draft(
        &self,
        request: SaveDraftRequest,
        thread: &Thread,
    ) -> Result<SaveDraftOutcome, ApplicationError> {
        let mut checkpoints = match &request.draft {
            Some(draft) => draft.checkpoints()?,
            None => Vec::new(),
        };
        let snapshot = thread.to_checkpoint()?;

        if let Some(draft) = &request.draft {
            let unchanged = checkpoints
                .first()
                .is_some_and(|latest| latest.data() == &snapshot);
            if !request.manually_saved && unchanged {
                debug!(draft_id = %draft.id, "长帖内容没有变化，跳过自动保存");
                return Ok(SaveDraftOutcome::Unchanged);
            }
        }

        let checkpoint =
            DraftCheckpoint::new(self.deps.clock.now(), snapshot, request.manually_saved);
        let mut draft = request
            .draft
            .unwrap_or_else(|| DraftItem::new_thread(self.deps.id_generator.generate()));

        checkpoints.insert(0, checkpoint);
        draft.set_checkpoints(&checkpoints)?;

        // 仓储写入失败只记录日志，调用方仍然拿到更新后的草稿
        if let Err(err) = self.put_first(&draft).await {
            error!(draft_id = %draft.id, error = %err, "草稿写入仓储失败");
        }

        info!(
            draft_id = %draft.id,
            checkpoints = checkpoints.len(),
            manually_saved = request.manually_saved,
            "草稿已保存"
        );
        Ok(SaveDraftOutcome::Saved(draft))
    }

    /// 从最新检查点还原长帖
    pub fn restore_latest(
        &self,
        draft: &DraftItem,
        author: PublicKey,
    ) -> Result<Thread, ApplicationError> {
        let latest = draft.latest_checkpoint()?.ok_or(DomainError::EmptyThread)?;
        let thread =
            Thread::from_checkpoint(latest.data(), author, self.deps.id_generator.as_ref())?;
        Ok(thread)
    }

    pub async fn list_drafts(&self) -> Result<Vec<DraftItem>, ApplicationError> {
        Ok(self.deps.draft_store.load_all().await?)
    }

    /// 删除草稿，返回是否存在
    pub async fn discard_draft(&self, draft_id: &str) -> Result<bool, ApplicationError> {
        let drafts = self.deps.draft_store.load_all().await?;
        let before = drafts.len();
        let remaining: Vec<DraftItem> = drafts.into_iter().filter(|d| d.id != draft_id).collect();
        if remaining.len() == before {
            return Ok(false);
        }

        self.deps.draft_store.store_all(remaining).await?;
        info!(draft_id = %draft_id, "草稿已删除");
        Ok(true)
    }

    /// 用新版本替换旧记录并放到最前，其余草稿保持原顺序
    async fn put_first(&self, draft: &DraftItem) -> Result<(), ApplicationError> {
        let drafts = self.deps.draft_store.load_all().await?;
        let mut updated = Vec::with_capacity(drafts.len() + 1);
        updated.push(draft.clone());
        updated.extend(drafts.into_iter().filter(|d| d.id != draft.id));
        self.deps.draft_store.store_all(updated).await?;
        Ok(())
    }
}
