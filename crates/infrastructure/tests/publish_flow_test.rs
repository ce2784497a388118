use std::sync::Arc;

use application::{
    DraftService, DraftServiceDependencies, FixedClock, PublishService,
    PublishServiceDependencies, PublishThreadRequest, SaveDraftOutcome, SaveDraftRequest,
    ThreadService, ThreadServiceDependencies,
};
use chrono::DateTime;
use domain::{Kind, PublicKey, SequentialIdGenerator, TagMarker, TierSelection, Timestamp};
use infrastructure::{DevSigner, InMemoryDraftStore, LocalTierPublisher, PassthroughTierPreparer};

const NOW_MILLIS: i64 = 1_700_000_000_000;

fn author() -> PublicKey {
    PublicKey::parse("integration-author").unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(DateTime::from_timestamp_millis(NOW_MILLIS).unwrap()))
}

struct Harness {
    threads: ThreadService,
    drafts: DraftService,
    publisher: PublishService,
    bus: LocalTierPublisher,
    signer: Arc<DevSigner>,
}

fn harness() -> Harness {
    let ids = Arc::new(SequentialIdGenerator::new("local"));
    let store = Arc::new(InMemoryDraftStore::new());
    let signer = Arc::new(DevSigner::new(b"integration-secret", author()));
    let bus = LocalTierPublisher::new(16);

    Harness {
        threads: ThreadService::new(ThreadServiceDependencies {
            clock: clock(),
            id_generator: ids.clone(),
        }),
        drafts: DraftService::new(DraftServiceDependencies {
            draft_store: store,
            clock: clock(),
            id_generator: ids,
        }),
        publisher: PublishService::new(PublishServiceDependencies {
            signer: signer.clone(),
            tier_preparer: Arc::new(PassthroughTierPreparer),
            tier_publisher: Arc::new(bus.clone()),
            clock: clock(),
        }),
        bus,
        signer,
    }
}

#[tokio::test]
async fn test_compose_save_and_publish_thread() {
    let h = harness();
    let mut receiver = h.bus.subscribe();

    let mut thread = h.threads.create_thread(Kind::TEXT_NOTE, author()).unwrap();
    thread.item_mut(0).unwrap().set_content("opening");
    h.threads.add_item(&mut thread).unwrap();
    thread.item_mut(1).unwrap().set_content("middle");
    thread.item_mut(1).unwrap().add_url("https://cdn.example/pic.png");
    h.threads.add_item(&mut thread).unwrap();
    thread.item_mut(2).unwrap().set_content("closing");

    let saved = h
        .drafts
        .save_draft(
            SaveDraftRequest {
                manually_saved: true,
                draft: None,
            },
            &thread,
        )
        .await
        .unwrap();
    let SaveDraftOutcome::Saved(draft) = saved else {
        panic!("first save must write a checkpoint");
    };

    // 内容未变的自动保存不写入
    let again = h
        .drafts
        .save_draft(
            SaveDraftRequest {
                manually_saved: false,
                draft: Some(draft.clone()),
            },
            &thread,
        )
        .await
        .unwrap();
    assert_eq!(again, SaveDraftOutcome::Unchanged);
    assert_eq!(h.drafts.list_drafts().await.unwrap(), vec![draft.clone()]);

    let restored = h.drafts.restore_latest(&draft, author()).unwrap();
    assert_eq!(restored, thread);

    let root = h
        .publisher
        .publish_thread(&restored, PublishThreadRequest::default())
        .await
        .unwrap();

    let mut published = Vec::new();
    for _ in 0..3 {
        published.push(receiver.recv().await.unwrap());
    }

    let start = Timestamp::from_secs(NOW_MILLIS / 1000);
    assert_eq!(published[0].event.id, *root.id());
    assert_eq!(published[0].event.created_at, start);
    assert_eq!(published[1].event.created_at, start.plus_secs(5));
    assert_eq!(published[2].event.created_at, start.plus_secs(10));

    assert!(published[0].event.tags.is_empty());
    assert_eq!(published[1].event.content, "middle\n\nhttps://cdn.example/pic.png");
    assert_eq!(
        published[1].event.tags[0].event_reference(TagMarker::Root),
        Some(root.id().as_str())
    );
    assert_eq!(published[1].event.tags.len(), 1);
    assert_eq!(
        published[2].event.tags[1].event_reference(TagMarker::Reply),
        Some(published[1].event.id.as_str())
    );

    assert!(h.signer.verify(&root));

    assert!(h.drafts.discard_draft(&draft.id).await.unwrap());
    assert!(h.drafts.list_drafts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scheduled_gated_thread_keeps_schedule() {
    let h = harness();
    let mut receiver = h.bus.subscribe();

    let mut thread = h.threads.create_thread(Kind::LONG_FORM, author()).unwrap();
    thread.item_mut(0).unwrap().set_content("members only");

    let publish_at = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
    let root = h
        .publisher
        .publish_thread(
            &thread,
            PublishThreadRequest {
                publish_at: Some(publish_at),
                tiers: Some(TierSelection::new().with_tier("gold", "Gold", true)),
            },
        )
        .await
        .unwrap();

    let received = receiver.recv().await.unwrap();
    assert_eq!(received.publish_at, Some(publish_at));
    assert_eq!(root.created_at(), Timestamp(1_800_000_000));
    assert_eq!(root.kind(), Kind::LONG_FORM);
}
