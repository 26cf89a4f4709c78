//! Resolver contracts consumed by the transaction builder.
//!
//! Both traits are async and object-safe so callers can inject them as
//! `Arc<dyn Resolver>` / `Arc<dyn GasResolver>`. Cancellation is driven by the
//! caller dropping the returned future.

use std::sync::Arc;

use anyhow::Result;
use sui_ptb_types::{Address, ObjectId, ObjectRef};

use crate::types::{GasBudgetInput, MoveFunction, ObjectMetadata, PackageMetadata};

/// Source of object metadata and Move function signatures.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Fetch metadata for `ids`.
    ///
    /// Must return exactly one record per id, in request order.
    async fn resolve_objects(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>>;

    /// Fetch the parameter list of `package::module::function`.
    async fn resolve_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction>;

    /// Fetch storage/original ids for a package.
    async fn resolve_package(&self, package_id: &ObjectId) -> Result<PackageMetadata>;
}

/// Source of gas price, budget and payment coins.
#[async_trait::async_trait]
pub trait GasResolver: Send + Sync {
    async fn resolve_gas_price(&self) -> Result<u64>;

    async fn resolve_gas_budget(&self, input: &GasBudgetInput) -> Result<u64>;

    /// Select coins owned by `owner` covering `budget`. Non-empty on success.
    async fn resolve_gas_payment(&self, owner: &Address, budget: u64) -> Result<Vec<ObjectRef>>;
}

#[async_trait::async_trait]
impl<T: Resolver + ?Sized> Resolver for Arc<T> {
    async fn resolve_objects(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        (**self).resolve_objects(ids).await
    }

    async fn resolve_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction> {
        (**self).resolve_move_function(package, module, function).await
    }

    async fn resolve_package(&self, package_id: &ObjectId) -> Result<PackageMetadata> {
        (**self).resolve_package(package_id).await
    }
}

#[async_trait::async_trait]
impl<T: GasResolver + ?Sized> GasResolver for Arc<T> {
    async fn resolve_gas_price(&self) -> Result<u64> {
        (**self).resolve_gas_price().await
    }

    async fn resolve_gas_budget(&self, input: &GasBudgetInput) -> Result<u64> {
        (**self).resolve_gas_budget(input).await
    }

    async fn resolve_gas_payment(&self, owner: &Address, budget: u64) -> Result<Vec<ObjectRef>> {
        (**self).resolve_gas_payment(owner, budget).await
    }
}
