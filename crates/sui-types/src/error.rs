//! Error type shared by the types crate.

use thiserror::Error;

/// Errors raised while parsing or (de)serializing transaction types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },

    #[error("invalid type tag '{input}': {reason}")]
    InvalidTypeTag { input: String, reason: String },

    #[error("invalid programmable transaction: {0}")]
    InvalidTransaction(String),

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid serialized signature: {0}")]
    InvalidSerializedSignature(String),

    #[error("invalid base64 in {context}: {reason}")]
    InvalidBase64 { context: String, reason: String },

    #[error("canonical codec error: {0}")]
    Codec(#[from] bcs::Error),
}

impl TypesError {
    pub(crate) fn address(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn digest(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDigest {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_tag(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTypeTag {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
