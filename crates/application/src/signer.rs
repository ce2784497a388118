use async_trait::async_trait;
use domain::{SignedEvent, UnsignedEvent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("signing failed: {0}")]
    Failed(String),
    #[error("signer rejected event: {0}")]
    Rejected(String),
}

impl SignerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// 事件签名器，签名之后事件的ID和签名都已确定
#[async_trait]
pub trait EventSigner: Send + Sync {
    async fn sign(&self, event: UnsignedEvent) -> Result<SignedEvent, SignerError>;
}
