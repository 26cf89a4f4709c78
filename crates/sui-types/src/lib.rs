//! Canonical types for Sui programmable transactions.
//!
//! This crate holds everything that participates in the on-chain byte format
//! and has no I/O:
//!
//! - [`codec`] - canonical (BCS) encode/decode, [`U256`]
//! - [`address`] - 32-byte [`Address`] / [`ObjectId`] with hex parsing
//! - [`digest`] - 32-byte [`Digest`] with base58 text form
//! - [`type_tag`] - Move [`TypeTag`] parser and encoder
//! - [`transaction`] - inputs, arguments, commands, gas data, transaction data
//! - [`signature`] - serialized user signature envelope
//! - [`encoding`] - base64 helpers for transport edges

pub mod address;
pub mod codec;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod signature;
pub mod transaction;
pub mod type_tag;

pub use address::{Address, ObjectId};
pub use codec::U256;
pub use digest::{Digest, ObjectDigest, TransactionDigest};
pub use error::TypesError;
pub use signature::{SignatureScheme, UserSignature};
pub use transaction::{
    Argument, CallArg, Command, GasData, ObjectArg, ObjectRef, ProgrammableMoveCall,
    ProgrammableTransaction, SharedObjectRef, TransactionData, TransactionDataV1,
    TransactionExpiration, TransactionKind,
};
pub use type_tag::{StructTag, TypeTag};
