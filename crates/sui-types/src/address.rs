//! Addresses and object IDs.
//!
//! Sui addresses are 32-byte values, but they're often represented in different formats:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix: "2"
//!
//! [`Address`] accepts any of these (1..=64 hex digits after an optional `0x`)
//! and always renders the full, lowercase, 66-character form. On the wire it is
//! 32 raw bytes with no length prefix.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypesError;

pub const ADDRESS_LENGTH: usize = 32;

/// Object IDs share the address representation.
pub type ObjectId = Address;

/// A 32-byte account or object address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Self = Self([0; ADDRESS_LENGTH]);
    /// Move standard library (`0x1`).
    pub const STD: Self = Self::from_low_byte(1);
    /// Sui framework (`0x2`).
    pub const FRAMEWORK: Self = Self::from_low_byte(2);
    /// Sui system package (`0x3`).
    pub const SYSTEM: Self = Self::from_low_byte(3);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    const fn from_low_byte(byte: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = byte;
        Self(bytes)
    }

    pub const fn into_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse a hex address, with or without `0x` prefix.
    ///
    /// Short forms are left-padded with zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use sui_ptb_types::Address;
    ///
    /// let addr = Address::from_hex("0x2").unwrap();
    /// assert_eq!(addr, Address::FRAMEWORK);
    /// assert!(Address::from_hex("0x").is_err());
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, TypesError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(TypesError::address(input, "no hex digits"));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(TypesError::address(
                input,
                format!("{} hex digits exceeds 64", digits.len()),
            ));
        }

        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| TypesError::address(input, e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Full form: `0x` + 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short form with leading zeros trimmed, useful for display.
    ///
    /// ```
    /// use sui_ptb_types::Address;
    ///
    /// assert_eq!(Address::FRAMEWORK.to_short_hex(), "0x2");
    /// assert_eq!(Address::ZERO.to_short_hex(), "0x0");
    /// ```
    pub fn to_short_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Check if this is a framework address (0x1, 0x2, 0x3).
    pub fn is_framework(&self) -> bool {
        *self == Self::STD || *self == Self::FRAMEWORK || *self == Self::SYSTEM
    }
}

/// Normalize an address string to lowercase with 0x prefix and full 64 hex characters.
///
/// This is the canonical address format for comparisons and resolver keys.
///
/// # Examples
///
/// ```
/// use sui_ptb_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2").unwrap(),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// assert_eq!(
///     normalize_address("ABC").unwrap(),
///     "0x0000000000000000000000000000000000000000000000000000000000000abc"
/// );
/// ```
pub fn normalize_address(addr: &str) -> Result<String, TypesError> {
    Address::from_hex(addr).map(|a| a.to_hex())
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(D::Error::custom)
        } else {
            <[u8; ADDRESS_LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0xABC").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
        assert_eq!(
            normalize_address("ABC").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
        assert_eq!(
            normalize_address("  0x2  ").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(
            normalize_address("0XABC").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Address::from_hex("").is_err());
        assert!(Address::from_hex("0x").is_err());
        assert!(Address::from_hex("not-hex").is_err());
        assert!(Address::from_hex("0xGGG").is_err());
        // 65 digits is mis-padded
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(matches!(
            Address::from_hex(&too_long),
            Err(TypesError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_odd_length_is_padded() {
        let addr = Address::from_hex("0x123").unwrap();
        assert_eq!(addr.as_bytes()[30], 0x01);
        assert_eq!(addr.as_bytes()[31], 0x23);
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(Address::from_hex("0x00abc").unwrap().to_short_hex(), "0xabc");
        assert_eq!(Address::SYSTEM.to_short_hex(), "0x3");
    }

    #[test]
    fn test_is_framework() {
        assert!(Address::from_hex("0x1").unwrap().is_framework());
        assert!(Address::from_hex("0x2").unwrap().is_framework());
        assert!(Address::from_hex("0x3").unwrap().is_framework());
        assert!(!Address::from_hex("0x4").unwrap().is_framework());
    }

    #[test]
    fn test_binary_form_is_32_raw_bytes() {
        let bytes = crate::codec::encode(&Address::FRAMEWORK).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 2);
    }

    #[test]
    fn test_json_form_is_full_hex() {
        let json = serde_json::to_string(&Address::FRAMEWORK).unwrap();
        assert_eq!(
            json,
            "\"0x0000000000000000000000000000000000000000000000000000000000000002\""
        );
        let back: Address = serde_json::from_str("\"0x2\"").unwrap();
        assert_eq!(back, Address::FRAMEWORK);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(digits in "[0-9a-fA-F]{1,64}") {
            let input = format!("0x{}", digits);
            let normalized = normalize_address(&input).unwrap();
            prop_assert_eq!(normalized.len(), 66);
            prop_assert_eq!(
                Address::from_hex(&normalized).unwrap(),
                Address::from_hex(&input).unwrap()
            );
        }
    }
}
