//! Ed25519 signer over the transaction-data intent.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use ed25519_dalek::{Signer as _, SigningKey, Verifier as _, VerifyingKey};
use sui_ptb::prelude::*;

type Blake2b256 = Blake2b<U32>;

/// Intent prefix for user transaction data: scope 0, version 0, app 0.
pub const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

pub struct Ed25519Signer {
    key: SigningKey,
}

#[allow(dead_code)]
impl Ed25519Signer {
    pub fn from_seed(seed: u8) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Blake2b-256 of the intent message, which is what actually gets signed.
    pub fn intent_digest(tx_bytes: &[u8]) -> [u8; 32] {
        let mut hasher = Blake2b256::new();
        hasher.update(TRANSACTION_INTENT);
        hasher.update(tx_bytes);
        hasher.finalize().into()
    }

    /// Check a raw 64-byte signature against `tx_bytes`.
    pub fn verify(&self, tx_bytes: &[u8], signature: &[u8]) -> bool {
        let Ok(bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(&bytes);
        self.verifying_key()
            .verify(&Self::intent_digest(tx_bytes), &signature)
            .is_ok()
    }
}

impl Signer for Ed25519Signer {
    /// Blake2b-256 of `flag || public key`.
    fn address(&self) -> Address {
        let mut hasher = Blake2b256::new();
        hasher.update([0x00u8]);
        hasher.update(self.key.verifying_key().as_bytes());
        Address::new(hasher.finalize().into())
    }

    fn sign(&self, tx_bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
        let signature = self.key.sign(&Self::intent_digest(tx_bytes));
        let mut out = Vec::with_capacity(97);
        out.push(0x00);
        out.extend_from_slice(&signature.to_bytes());
        out.extend_from_slice(self.key.verifying_key().as_bytes());
        Ok(out)
    }
}
