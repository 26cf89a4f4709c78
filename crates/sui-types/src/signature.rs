//! Serialized user signatures.
//!
//! A serialized signature is `flag (1 byte) || signature (64 bytes) || public key`,
//! where the flag selects the scheme and the public key length depends on it.

use serde::{Deserialize, Serialize};

use crate::encoding::base64_encode;
use crate::error::TypesError;

pub const SIGNATURE_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureScheme {
    Ed25519,
    Secp256k1,
    Secp256r1,
}

impl SignatureScheme {
    pub fn flag(self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0x00,
            SignatureScheme::Secp256k1 => 0x01,
            SignatureScheme::Secp256r1 => 0x02,
        }
    }

    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0x00 => Some(SignatureScheme::Ed25519),
            0x01 => Some(SignatureScheme::Secp256k1),
            0x02 => Some(SignatureScheme::Secp256r1),
            _ => None,
        }
    }

    pub fn public_key_length(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => 32,
            SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => 33,
        }
    }

    /// Total serialized length for this scheme.
    pub fn serialized_length(self) -> usize {
        1 + SIGNATURE_LENGTH + self.public_key_length()
    }
}

/// A single-key user signature split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserSignature {
    pub scheme: SignatureScheme,
    pub signature: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl UserSignature {
    /// Split a serialized signature.
    ///
    /// Fails on an unknown flag or when the length does not match the scheme.
    pub fn from_serialized(bytes: &[u8]) -> Result<Self, TypesError> {
        let (&flag, rest) = bytes
            .split_first()
            .ok_or_else(|| TypesError::InvalidSerializedSignature("empty buffer".into()))?;
        let scheme = SignatureScheme::from_flag(flag).ok_or_else(|| {
            TypesError::InvalidSerializedSignature(format!("unknown scheme flag 0x{:02x}", flag))
        })?;
        if bytes.len() != scheme.serialized_length() {
            return Err(TypesError::InvalidSerializedSignature(format!(
                "{:?} signature must be {} bytes, got {}",
                scheme,
                scheme.serialized_length(),
                bytes.len()
            )));
        }
        let (signature, public_key) = rest.split_at(SIGNATURE_LENGTH);
        Ok(Self {
            scheme,
            signature: signature.to_vec(),
            public_key: public_key.to_vec(),
        })
    }

    /// Re-join into the serialized form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.signature.len() + self.public_key.len());
        out.push(self.scheme.flag());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.public_key);
        out
    }

    pub fn to_base64(&self) -> String {
        base64_encode(&self.to_bytes())
    }

    /// RPC-level representation: the serialized form plus its parts.
    pub fn to_rpc(&self) -> RpcUserSignature {
        RpcUserSignature {
            bcs: self.to_base64(),
            scheme: self.scheme,
            simple: RpcSimpleSignature {
                scheme: self.scheme,
                signature: base64_encode(&self.signature),
                public_key: base64_encode(&self.public_key),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSimpleSignature {
    pub scheme: SignatureScheme,
    pub signature: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcUserSignature {
    /// Base64 of the full serialized signature.
    pub bcs: String,
    pub scheme: SignatureScheme,
    pub simple: RpcSimpleSignature,
}
