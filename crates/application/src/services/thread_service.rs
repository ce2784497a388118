use std::sync::Arc;

use domain::{IdGenerator, Kind, PublicKey, Thread, ThreadCheckpoint, Timestamp};

use crate::{clock::Clock, error::ApplicationError};

pub struct ThreadServiceDependencies {
    pub clock: Arc<dyn Clock>,
    pub id_generator: Arc<dyn IdGenerator>,
}

/// 长帖撰写服务，为聚合提供时间和随机标识
pub struct ThreadService {
    deps: ThreadServiceDependencies,
}

impl ThreadService {
    pub fn new(deps: ThreadServiceDependencies) -> Self {
        Self { deps }
    }

    fn now(&self) -> Timestamp {
        Timestamp::from(self.deps.clock.now())
    }

    pub fn create_thread(&self, kind: Kind, author: PublicKey) -> Result<Thread, ApplicationError> {
        let thread = Thread::new(kind, author, self.deps.id_generator.as_ref(), self.now())?;
        tracing::debug!(kind = %kind, "创建长帖");
        Ok(thread)
    }

    pub fn add_item(&self, thread: &mut Thread) -> Result<(), ApplicationError> {
        let now = self.now();
        thread.new_item(self.deps.id_generator.as_ref(), now)?;
        Ok(())
    }

    pub fn restore_thread(
        &self,
        checkpoint: &ThreadCheckpoint,
        author: PublicKey,
    ) -> Result<Thread, ApplicationError> {
        let thread = Thread::from_checkpoint(checkpoint, author, self.deps.id_generator.as_ref())?;
        tracing::debug!(thread_items = thread.len(), "从检查点还原长帖");
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::DateTime;
    use domain::{DomainError, SequentialIdGenerator};

    fn service() -> ThreadService {
        ThreadService::new(ThreadServiceDependencies {
            clock: Arc::new(FixedClock(
                DateTime::from_timestamp_millis(1_700_000_000_750).unwrap(),
            )),
            id_generator: Arc::new(SequentialIdGenerator::new("item")),
        })
    }

    #[test]
    fn test_create_and_add_items() {
        let service = service();
        let author = PublicKey::parse("author").unwrap();
        let mut thread = service.create_thread(Kind::TEXT_NOTE, author).unwrap();

        service.add_item(&mut thread).unwrap();

        assert_eq!(thread.len(), 2);
        for item in thread.items() {
            assert_eq!(item.event.created_at, Timestamp(1_700_000_000));
            assert!(item.event.id.is_some());
        }
    }

    #[test]
    fn test_restore_empty_checkpoint() {
        let service = service();
        let author = PublicKey::parse("author").unwrap();
        let err = service
            .restore_thread(&ThreadCheckpoint::default(), author)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyThread)));
    }
}
