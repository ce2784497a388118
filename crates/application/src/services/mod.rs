mod draft_service;
mod publish_service;
mod thread_service;

pub use draft_service::{DraftService, DraftServiceDependencies, SaveDraftOutcome, SaveDraftRequest};
pub use publish_service::{
    PublishService, PublishServiceDependencies, PublishThreadRequest, DEFAULT_ITEM_SPACING_SECONDS,
};
pub use thread_service::{ThreadService, ThreadServiceDependencies};
