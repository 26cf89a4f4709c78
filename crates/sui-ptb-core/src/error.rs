//! Build errors.

use std::fmt;

use sui_ptb_types::{Address, ObjectId, TypesError};
use thiserror::Error;

/// Gas field being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasStage {
    Price,
    Budget,
    Payment,
}

impl fmt::Display for GasStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GasStage::Price => "price",
            GasStage::Budget => "budget",
            GasStage::Payment => "payment",
        })
    }
}

/// Errors from building, resolving or signing a transaction.
///
/// `Clone` so the builder can keep the first error and report it again from
/// both [`crate::TransactionBuilder::err`] and [`crate::TransactionBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("too many {what}: at most {limit} allowed")]
    IndexOverflow { what: &'static str, limit: usize },

    #[error("invalid argument in command {command}: {reason}")]
    InvalidArgument { command: usize, reason: String },

    #[error("invalid move call target '{target}': {reason}")]
    InvalidMoveTarget { target: String, reason: String },

    #[error("input {index} ({object_id}) is still unresolved")]
    UnresolvedInput { index: usize, object_id: ObjectId },

    #[error("signature mismatch for {function}: {reason}")]
    SignatureMismatch { function: String, reason: String },

    #[error("shared object {0} missing initial shared version")]
    SharedVersionMissing(ObjectId),

    #[error("{0} object input(s) need resolution but no resolver was supplied")]
    ResolverUnavailable(usize),

    #[error("resolver failed while fetching {what}: {message}")]
    ResolverFailed { what: String, message: String },

    #[error("resolver response mismatch: {0}")]
    ResolverResponseMismatch(String),

    #[error("gas {stage} resolution failed: {message}")]
    GasResolutionFailed { stage: GasStage, message: String },

    #[error("transaction is incomplete: {0}")]
    IncompleteTransaction(String),

    #[error("signer {signer} is neither the sender nor the gas owner")]
    SignerNotParticipant { signer: Address },

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("build cancelled")]
    Cancelled,
}

impl BuildError {
    pub(crate) fn resolver(what: impl Into<String>, err: anyhow::Error) -> Self {
        Self::ResolverFailed {
            what: what.into(),
            message: format!("{:#}", err),
        }
    }

    pub(crate) fn gas(stage: GasStage, message: impl Into<String>) -> Self {
        Self::GasResolutionFailed {
            stage,
            message: message.into(),
        }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
