//! 32-byte digests.
//!
//! Text form is base58. Binary form is length-prefixed (ULEB128 `32` followed
//! by the bytes), which is what distinguishes an `ObjectRef` digest from a
//! fixed-width address on the wire.

use std::fmt;
use std::str::FromStr;

use serde::de::{Error as _, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypesError;

pub const DIGEST_LENGTH: usize = 32;

/// A 32-byte digest (object digest or transaction digest).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_LENGTH]);

pub type ObjectDigest = Digest;
pub type TransactionDigest = Digest;

impl Digest {
    pub const ZERO: Self = Self([0; DIGEST_LENGTH]);

    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn inner(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    pub const fn into_inner(self) -> [u8; DIGEST_LENGTH] {
        self.0
    }

    /// Parse a base58 digest.
    ///
    /// ```
    /// use sui_ptb_types::Digest;
    ///
    /// let d = Digest::new([1; 32]);
    /// assert_eq!(Digest::from_base58(&d.to_base58()).unwrap(), d);
    /// assert!(Digest::from_base58("0OIl").is_err());
    /// ```
    pub fn from_base58(input: &str) -> Result<Self, TypesError> {
        let bytes = bs58::decode(input.trim())
            .into_vec()
            .map_err(|e| TypesError::digest(input, e.to_string()))?;
        Self::try_from(bytes.as_slice()).map_err(|_| {
            TypesError::digest(input, format!("expected 32 bytes, got {}", bytes.len()))
        })
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = TypesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DIGEST_LENGTH] = bytes.try_into().map_err(|_| {
            TypesError::digest(
                &hex::encode(bytes),
                format!("expected 32 bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Self(arr))
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_base58())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_base58(&s).map_err(D::Error::custom)
        } else {
            deserializer.deserialize_bytes(DigestVisitor)
        }
    }
}

struct DigestVisitor;

impl<'de> Visitor<'de> for DigestVisitor {
    type Value = Digest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a length-prefixed 32-byte digest")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Digest::try_from(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = Vec::with_capacity(DIGEST_LENGTH);
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Digest::try_from(bytes.as_slice()).map_err(A::Error::custom)
    }
}
