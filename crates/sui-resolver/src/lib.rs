//! Sui PTB Resolver
//!
//! Contracts and implementations for the on-chain lookups a transaction
//! builder needs before it can emit bytes.
//!
//! This crate provides:
//! - [`resolver`]: the [`Resolver`] (objects, Move signatures, packages) and
//!   [`GasResolver`] (price, budget, payment) contracts
//! - [`types`]: records exchanged through those contracts
//! - [`cache`]: [`CachingResolver`], a read-through cache over any resolver
//! - [`packages`]: [`PackageUpgradeIndex`] for storage/original package ids
//! - [`gas`]: [`NodeGasResolver`], budget policy and first-fit coin selection
//! - [`memory`]: fixture-backed resolvers for tests and offline use

pub mod cache;
pub mod gas;
pub mod memory;
pub mod packages;
pub mod resolver;
pub mod types;

pub use cache::{CacheStats, CachingResolver};
pub use gas::{
    compute_gas_budget, select_coins, GasBudgetPolicy, GasCoin, GasCostSummary, GasNode,
    NodeGasResolver,
};
pub use memory::{InMemoryGasNode, InMemoryResolver, StaticGasResolver};
pub use packages::PackageUpgradeIndex;
pub use resolver::{GasResolver, Resolver};
pub use types::{
    GasBudgetInput, MoveFunction, MoveParameter, ObjectMetadata, OwnerKind, PackageMetadata,
    ReferenceKind,
};
