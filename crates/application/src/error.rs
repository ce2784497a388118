use domain::{DomainError, RepositoryError};
use thiserror::Error;

use crate::signer::SignerError;
use crate::tiers::TierError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("signer error: {0}")]
    Signer(#[from] SignerError),
    #[error("tier error: {0}")]
    Tier(#[from] TierError),
    #[error("cannot publish an empty thread")]
    EmptyThread,
    #[error("failed to prepare event for publish (item {index})")]
    EventPreparationFailed { index: usize },
}
