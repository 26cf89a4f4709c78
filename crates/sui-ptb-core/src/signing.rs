//! Signing envelope.
//!
//! The builder never holds keys. A [`Signer`] turns transaction bytes into a
//! serialized signature (`flag || signature || public key`), which is split
//! and validated here before being packaged for execution.

use serde::{Deserialize, Serialize};
use sui_ptb_types::encoding::base64_encode;
use sui_ptb_types::signature::RpcUserSignature;
use sui_ptb_types::{Address, TransactionData, TransactionDigest, UserSignature};
use tracing::debug;

use crate::builder::BuiltTransaction;
use crate::error::{BuildError, BuildResult};

/// Key holder for one address.
pub trait Signer: Send + Sync {
    fn address(&self) -> Address;

    /// Sign canonical transaction-data bytes, returning the serialized
    /// signature. Any intent prefix or hashing the scheme requires is the
    /// signer's concern.
    fn sign(&self, tx_bytes: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// Payload for an execute call: base64 transaction bytes and signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub tx_bytes: String,
    pub signatures: Vec<String>,
}

/// Transaction data with one signature per participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub data: TransactionData,
    pub tx_bytes: Vec<u8>,
    pub signatures: Vec<UserSignature>,
}

impl SignedTransaction {
    /// Add a co-signature, e.g. from a gas sponsor.
    pub fn add_signature(&mut self, signer: &dyn Signer) -> BuildResult<()> {
        let signature = sign_checked(&self.data, &self.tx_bytes, signer)?;
        self.signatures.push(signature);
        Ok(())
    }

    pub fn digest(&self) -> BuildResult<TransactionDigest> {
        Ok(self.data.digest()?)
    }

    pub fn rpc_signatures(&self) -> Vec<RpcUserSignature> {
        self.signatures.iter().map(UserSignature::to_rpc).collect()
    }

    pub fn execute_request(&self) -> ExecuteRequest {
        ExecuteRequest {
            tx_bytes: base64_encode(&self.tx_bytes),
            signatures: self.signatures.iter().map(UserSignature::to_base64).collect(),
        }
    }
}

/// Sign a fully built transaction.
///
/// Fails when the build produced only kind bytes, or when the signer is
/// neither the sender nor the gas owner.
pub fn sign_transaction(
    built: &BuiltTransaction,
    signer: &dyn Signer,
) -> BuildResult<SignedTransaction> {
    let (Some(data), Some(tx_bytes)) = (&built.data, &built.tx_bytes) else {
        return Err(BuildError::IncompleteTransaction(
            "sender or gas data missing; only kind bytes were built".into(),
        ));
    };
    let signature = sign_checked(data, tx_bytes, signer)?;
    Ok(SignedTransaction {
        data: data.clone(),
        tx_bytes: tx_bytes.clone(),
        signatures: vec![signature],
    })
}

fn sign_checked(
    data: &TransactionData,
    tx_bytes: &[u8],
    signer: &dyn Signer,
) -> BuildResult<UserSignature> {
    let address = signer.address();
    if address != data.sender() && address != data.gas_data().owner {
        return Err(BuildError::SignerNotParticipant { signer: address });
    }
    let raw = signer
        .sign(tx_bytes)
        .map_err(|e| BuildError::SigningFailed(format!("{:#}", e)))?;
    let signature = UserSignature::from_serialized(&raw)?;
    debug!(signer = %address, scheme = ?signature.scheme, "transaction signed");
    Ok(signature)
}
