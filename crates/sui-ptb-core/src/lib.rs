//! Sui PTB Core
//!
//! Programmable transaction builder for Sui.
//!
//! This crate provides:
//! - [`builder`]: [`TransactionBuilder`], the fluent accumulator of inputs and
//!   commands, and [`BuiltTransaction`], its output
//! - [`resolution`]: turns id-only object inputs into shared, owned or
//!   receiving references using a [`sui_ptb_resolver::Resolver`]
//! - [`gas`]: fills in gas price, budget and payment through a
//!   [`sui_ptb_resolver::GasResolver`]
//! - [`signing`]: the [`Signer`] contract and execute-ready [`SignedTransaction`]
//! - [`config`]: [`BuilderConfig`] limits and per-build [`BuildOptions`]
//!
//! # Build flow
//!
//! `build` runs sequentially: usage analysis (Move signatures), one object
//! batch lookup, input coercion, serialization of the transaction kind, then
//! gas price, budget and payment. Every collaborator call is raced against the
//! options' cancellation token.

pub mod builder;
pub mod config;
pub mod error;
pub mod gas;
pub mod input;
pub mod resolution;
pub mod signing;

pub use builder::{BuiltTransaction, TransactionBuilder};
pub use config::{BuildOptions, BuilderConfig};
pub use error::{BuildError, BuildResult, GasStage};
pub use gas::GasConfig;
pub use input::UnresolvedInput;
pub use resolution::InputUsage;
pub use signing::{sign_transaction, ExecuteRequest, SignedTransaction, Signer};
