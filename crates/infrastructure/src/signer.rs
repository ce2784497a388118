//! 开发环境签名器
//!
//! 使用本地密钥对事件ID做 HMAC-SHA256，只用于本地联调，不是网络可验证的签名。

use application::{EventSigner, SignerError};
use async_trait::async_trait;
use data_encoding::HEXLOWER;
use domain::{PublicKey, SignedEvent, Signature, UnsignedEvent};
use ring::hmac;

pub struct DevSigner {
    key: hmac::Key,
    pubkey: PublicKey,
}

impl DevSigner {
    pub fn new(secret: &[u8], pubkey: PublicKey) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
            pubkey,
        }
    }

    /// 校验签名是否由该签名器产生
    pub fn verify(&self, event: &SignedEvent) -> bool {
        HEXLOWER
            .decode(event.sig().as_str().as_bytes())
            .map(|tag| hmac::verify(&self.key, event.id().as_str().as_bytes(), &tag).is_ok())
            .unwrap_or(false)
    }
}

#[async_trait]
impl EventSigner for DevSigner {
    async fn sign(&self, event: UnsignedEvent) -> Result<SignedEvent, SignerError> {
        if event.pubkey != self.pubkey {
            return Err(SignerError::rejected(format!(
                "event author {} does not match signer {}",
                event.pubkey, self.pubkey
            )));
        }

        let id = event.compute_id();
        let tag = hmac::sign(&self.key, id.as_str().as_bytes());
        let sig = Signature::new(HEXLOWER.encode(tag.as_ref()))
            .map_err(|err| SignerError::failed(err.to_string()))?;
        Ok(event.into_signed(sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Kind, Timestamp};

    fn event(author: &str) -> UnsignedEvent {
        UnsignedEvent {
            pubkey: PublicKey::parse(author).unwrap(),
            kind: Kind::TEXT_NOTE,
            created_at: Timestamp(10),
            content: "hello".to_string(),
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_sign_and_verify() {
        let signer = DevSigner::new(b"local-secret", PublicKey::parse("author").unwrap());
        let expected_id = event("author").compute_id();

        let signed = signer.sign(event("author")).await.unwrap();

        assert_eq!(signed.id(), &expected_id);
        assert_eq!(signed.sig().as_str().len(), 64);
        assert!(signer.verify(&signed));

        let other = DevSigner::new(b"other-secret", PublicKey::parse("author").unwrap());
        assert!(!other.verify(&signed));
    }

    #[tokio::test]
    async fn test_rejects_foreign_author() {
        let signer = DevSigner::new(b"local-secret", PublicKey::parse("author").unwrap());
        let err = signer.sign(event("someone-else")).await.unwrap_err();
        assert!(matches!(err, SignerError::Rejected(_)));
    }
}
