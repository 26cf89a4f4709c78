//! In-memory resolvers.
//!
//! Fixture-backed implementations of [`Resolver`], [`GasResolver`] and
//! [`GasNode`]. Every call is appended to a log so tests can assert which
//! calls were made and in what order.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use parking_lot::{Mutex, RwLock};
use sui_ptb_types::{Address, ObjectId, ObjectRef, TransactionData};

use crate::gas::{GasCoin, GasCostSummary, GasNode};
use crate::resolver::{GasResolver, Resolver};
use crate::types::{GasBudgetInput, MoveFunction, ObjectMetadata, PackageMetadata};

// =============================================================================
// Object / function resolver
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverCall {
    Objects(Vec<ObjectId>),
    MoveFunction {
        package: ObjectId,
        module: String,
        function: String,
    },
    Package(ObjectId),
}

#[derive(Debug, Default)]
pub struct InMemoryResolver {
    objects: RwLock<HashMap<ObjectId, ObjectMetadata>>,
    functions: RwLock<HashMap<(ObjectId, String, String), MoveFunction>>,
    packages: RwLock<HashMap<ObjectId, PackageMetadata>>,
    calls: Mutex<Vec<ResolverCall>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, metadata: ObjectMetadata) -> Self {
        self.insert_object(metadata);
        self
    }

    pub fn with_function(
        self,
        package: ObjectId,
        module: &str,
        function: &str,
        signature: MoveFunction,
    ) -> Self {
        self.functions
            .write()
            .insert((package, module.to_string(), function.to_string()), signature);
        self
    }

    pub fn with_package(self, package: PackageMetadata) -> Self {
        self.packages.write().insert(package.storage_id, package);
        self
    }

    /// Add or replace an object, e.g. after its version changed.
    pub fn insert_object(&self, metadata: ObjectMetadata) {
        self.objects.write().insert(metadata.id, metadata);
    }

    pub fn calls(&self) -> Vec<ResolverCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait::async_trait]
impl Resolver for InMemoryResolver {
    async fn resolve_objects(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        self.calls.lock().push(ResolverCall::Objects(ids.to_vec()));
        let objects = self.objects.read();
        ids.iter()
            .map(|id| {
                objects
                    .get(id)
                    .cloned()
                    .ok_or_else(|| anyhow!("object {} not found", id))
            })
            .collect()
    }

    async fn resolve_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction> {
        self.calls.lock().push(ResolverCall::MoveFunction {
            package: *package,
            module: module.to_string(),
            function: function.to_string(),
        });
        self.functions
            .read()
            .get(&(*package, module.to_string(), function.to_string()))
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "function {}::{}::{} not found",
                    package.to_short_hex(),
                    module,
                    function
                )
            })
    }

    async fn resolve_package(&self, package_id: &ObjectId) -> Result<PackageMetadata> {
        self.calls.lock().push(ResolverCall::Package(*package_id));
        self.packages
            .read()
            .get(package_id)
            .copied()
            .ok_or_else(|| anyhow!("package {} not found", package_id))
    }
}

// =============================================================================
// Fixed gas resolver
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasResolverCall {
    Price,
    Budget(GasBudgetInput),
    Payment { owner: Address, budget: u64 },
}

/// Gas resolver answering every stage from fixed values.
///
/// A stage without a value fails, which lets tests exercise error paths.
#[derive(Debug, Default)]
pub struct StaticGasResolver {
    price: Option<u64>,
    budget: Option<u64>,
    payment: Option<Vec<ObjectRef>>,
    calls: Mutex<Vec<GasResolverCall>>,
}

impl StaticGasResolver {
    pub fn new(price: u64, budget: u64, payment: Vec<ObjectRef>) -> Self {
        Self {
            price: Some(price),
            budget: Some(budget),
            payment: Some(payment),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_price(mut self) -> Self {
        self.price = None;
        self
    }

    pub fn without_budget(mut self) -> Self {
        self.budget = None;
        self
    }

    pub fn without_payment(mut self) -> Self {
        self.payment = None;
        self
    }

    pub fn calls(&self) -> Vec<GasResolverCall> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl GasResolver for StaticGasResolver {
    async fn resolve_gas_price(&self) -> Result<u64> {
        self.calls.lock().push(GasResolverCall::Price);
        self.price.ok_or_else(|| anyhow!("gas price unavailable"))
    }

    async fn resolve_gas_budget(&self, input: &GasBudgetInput) -> Result<u64> {
        self.calls.lock().push(GasResolverCall::Budget(input.clone()));
        self.budget.ok_or_else(|| anyhow!("gas budget unavailable"))
    }

    async fn resolve_gas_payment(&self, owner: &Address, budget: u64) -> Result<Vec<ObjectRef>> {
        self.calls.lock().push(GasResolverCall::Payment {
            owner: *owner,
            budget,
        });
        self.payment
            .clone()
            .ok_or_else(|| anyhow!("no gas coins for {}", owner))
    }
}

// =============================================================================
// Gas node
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasNodeCall {
    ReferenceGasPrice,
    Simulate(TransactionData),
    ListCoins(Address),
}

#[derive(Debug, Default)]
pub struct InMemoryGasNode {
    reference_gas_price: u64,
    simulation: GasCostSummary,
    coins: HashMap<Address, Vec<GasCoin>>,
    calls: Mutex<Vec<GasNodeCall>>,
}

impl InMemoryGasNode {
    pub fn new(reference_gas_price: u64) -> Self {
        Self {
            reference_gas_price,
            ..Self::default()
        }
    }

    pub fn with_simulation(mut self, summary: GasCostSummary) -> Self {
        self.simulation = summary;
        self
    }

    pub fn with_coins(mut self, owner: Address, coins: Vec<GasCoin>) -> Self {
        self.coins.insert(owner, coins);
        self
    }

    pub fn calls(&self) -> Vec<GasNodeCall> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl GasNode for InMemoryGasNode {
    async fn reference_gas_price(&self) -> Result<u64> {
        self.calls.lock().push(GasNodeCall::ReferenceGasPrice);
        Ok(self.reference_gas_price)
    }

    async fn simulate(&self, tx: &TransactionData) -> Result<GasCostSummary> {
        self.calls.lock().push(GasNodeCall::Simulate(tx.clone()));
        Ok(self.simulation)
    }

    async fn list_coins(&self, owner: &Address) -> Result<Vec<GasCoin>> {
        self.calls.lock().push(GasNodeCall::ListCoins(*owner));
        Ok(self.coins.get(owner).cloned().unwrap_or_default())
    }
}
