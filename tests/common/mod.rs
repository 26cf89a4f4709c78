#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: addresses, object references and in-memory resolvers
//! - `signer`: an Ed25519 [`sui_ptb::core::Signer`] backed by a fixed seed
//! - `assertions`: byte-level assertion helpers

pub mod assertions;
pub mod fixtures;
pub mod signer;

pub use assertions::{assert_base64_eq, assert_error_contains};
pub use fixtures::{addr, digest_of, framework_resolver, obj_ref};
pub use signer::Ed25519Signer;
