//! 主应用程序入口
//!
//! 从 JSON 文件读取长帖条目，保存草稿后通过本地适配器发布，并输出根事件。

use std::{env, fs, sync::Arc};

use anyhow::{bail, Context};
use application::{
    Clock, DraftService, DraftServiceDependencies, PublishService, PublishServiceDependencies,
    PublishThreadRequest, RandomIdGenerator, SaveDraftOutcome, SaveDraftRequest, SystemClock,
    ThreadService, ThreadServiceDependencies,
};
use config::AppConfig;
use domain::{IdGenerator, Kind, PublicKey};
use infrastructure::{DevSigner, InMemoryDraftStore, LocalTierPublisher, PassthroughTierPreparer};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_AUTHOR: &str = "dev-author";

/// 输入文件中的单个条目
#[derive(Debug, Deserialize)]
struct ItemInput {
    content: String,
    #[serde(default)]
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // 初始化日志，RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: thread-publisher <items.json> [author-pubkey]");
    };
    let author = PublicKey::parse(args.next().unwrap_or_else(|| DEFAULT_AUTHOR.to_string()))?;

    let raw =
        fs::read_to_string(&path).with_context(|| format!("读取条目文件失败: {path}"))?;
    let inputs: Vec<ItemInput> =
        serde_json::from_str(&raw).with_context(|| format!("解析条目文件失败: {path}"))?;
    if inputs.is_empty() {
        bail!("条目文件为空: {path}");
    }

    // 依赖装配
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::new(config.drafts.id_length));
    let signer = Arc::new(DevSigner::new(
        config.signer.dev_secret.as_bytes(),
        author.clone(),
    ));
    let publisher = LocalTierPublisher::new(64);

    let thread_service = ThreadService::new(ThreadServiceDependencies {
        clock: clock.clone(),
        id_generator: ids.clone(),
    });
    let draft_service = DraftService::new(DraftServiceDependencies {
        draft_store: Arc::new(InMemoryDraftStore::new()),
        clock: clock.clone(),
        id_generator: ids,
    });
    let publish_service = PublishService::new(PublishServiceDependencies {
        signer,
        tier_preparer: Arc::new(PassthroughTierPreparer),
        tier_publisher: Arc::new(publisher.clone()),
        clock,
    })
    .with_item_spacing(config.publish.item_spacing_seconds)?;

    // 撰写长帖
    let mut thread = thread_service.create_thread(Kind::TEXT_NOTE, author)?;
    for (index, input) in inputs.into_iter().enumerate() {
        if index > 0 {
            thread_service.add_item(&mut thread)?;
        }
        let Some(item) = thread.item_mut(index) else {
            bail!("条目 {index} 不存在");
        };
        item.set_content(input.content);
        for url in input.urls {
            item.add_url(url);
        }
    }

    let draft = match draft_service
        .save_draft(
            SaveDraftRequest {
                manually_saved: true,
                draft: None,
            },
            &thread,
        )
        .await?
    {
        SaveDraftOutcome::Saved(draft) => draft,
        SaveDraftOutcome::Unchanged => bail!("草稿未能保存"),
    };

    let mut published = publisher.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(event) = published.recv().await {
            tracing::info!(
                event_id = %event.event.id,
                created_at = %event.event.created_at,
                "事件已分发"
            );
        }
    });

    let root = publish_service
        .publish_thread(&thread, PublishThreadRequest::default())
        .await?;

    draft_service.discard_draft(&draft.id).await?;

    println!("{}", serde_json::to_string_pretty(&root.raw())?);

    drop(publish_service);
    drop(publisher);
    listener.await?;
    Ok(())
}
