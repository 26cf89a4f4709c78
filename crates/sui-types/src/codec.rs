//! Canonical binary codec.
//!
//! Sui transactions are encoded with BCS: little-endian fixed-width integers,
//! ULEB128 length prefixes for strings, byte vectors and sequences, a one-byte
//! tag for options, a ULEB128 variant index for enums and declaration-order
//! fields for structs. The heavy lifting is delegated to the `bcs` crate; this
//! module adds 256-bit integers, which the crate does not provide, and wraps
//! errors into [`TypesError`].
//!
//! # Example
//!
//! ```
//! use sui_ptb_types::codec::{decode, encode};
//!
//! let bytes = encode(&Some(vec![1u8, 2, 3])).unwrap();
//! assert_eq!(bytes, vec![1, 3, 1, 2, 3]);
//!
//! let value: Option<Vec<u8>> = decode(&bytes).unwrap();
//! assert_eq!(value, Some(vec![1, 2, 3]));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

// =============================================================================
// Encode / Decode
// =============================================================================

/// Encode a value with the canonical codec.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, TypesError> {
    Ok(bcs::to_bytes(value)?)
}

/// Decode a value with the canonical codec.
///
/// The whole buffer must be consumed: trailing bytes and short buffers are
/// both rejected.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TypesError> {
    Ok(bcs::from_bytes(bytes)?)
}

// =============================================================================
// U256
// =============================================================================

/// Unsigned 256-bit integer, stored and encoded as 32 little-endian bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct U256([u8; 32]);

impl U256 {
    pub const ZERO: Self = Self([0; 32]);

    pub const fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_le_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<u32> for U256 {
    fn from(value: u32) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<u8> for U256 {
    fn from(value: u8) -> Self {
        Self::from(u128::from(value))
    }
}
