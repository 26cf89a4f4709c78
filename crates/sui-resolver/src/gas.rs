//! Node-backed gas resolution.
//!
//! [`NodeGasResolver`] implements [`GasResolver`] on top of three node calls:
//! the reference gas price, a simulation of the transaction kind, and a listing
//! of the owner's gas coins.
//!
//! Budget is the simulated net cost plus a buffer:
//!
//! ```text
//! net    = computation + storage + non_refundable_storage_fee - storage_rebate
//! budget = net + max(net / buffer_divisor, min_buffer)
//! ```
//!
//! All arithmetic saturates at the `u64` bounds.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sui_ptb_types::{Address, GasData, ObjectRef, TransactionData};
use tracing::debug;

use crate::resolver::GasResolver;
use crate::types::GasBudgetInput;

/// Upper bound handed to the node while simulating, before a budget is known.
pub const DEFAULT_SIMULATION_BUDGET: u64 = 50_000_000_000;

// =============================================================================
// Cost summary and budget policy
// =============================================================================

/// Gas costs reported by a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasCostSummary {
    /// Computation gas cost (bytecode execution, native functions)
    pub computation_cost: u64,
    /// Storage gas cost (new and modified objects)
    pub storage_cost: u64,
    /// Storage rebate (from deleted or shrunk objects)
    pub storage_rebate: u64,
    /// Non-refundable storage fee (burned)
    pub non_refundable_storage_fee: u64,
}

impl GasCostSummary {
    pub fn new(
        computation_cost: u64,
        storage_cost: u64,
        storage_rebate: u64,
        non_refundable_storage_fee: u64,
    ) -> Self {
        Self {
            computation_cost,
            storage_cost,
            storage_rebate,
            non_refundable_storage_fee,
        }
    }

    /// Net cost, clamped to `0..=u64::MAX`.
    pub fn net_cost(&self) -> u64 {
        self.computation_cost
            .saturating_add(self.storage_cost)
            .saturating_add(self.non_refundable_storage_fee)
            .saturating_sub(self.storage_rebate)
    }
}

/// Safety margin added on top of a simulated cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasBudgetPolicy {
    /// Buffer is `net / buffer_divisor`. Zero disables the proportional part.
    pub buffer_divisor: u64,
    /// Floor for the buffer.
    pub min_buffer: u64,
    /// Budget used for the simulation itself.
    pub simulation_budget: u64,
}

impl Default for GasBudgetPolicy {
    fn default() -> Self {
        Self {
            buffer_divisor: 10,
            min_buffer: 1000,
            simulation_budget: DEFAULT_SIMULATION_BUDGET,
        }
    }
}

impl GasBudgetPolicy {
    pub fn with_buffer_divisor(mut self, divisor: u64) -> Self {
        self.buffer_divisor = divisor;
        self
    }

    pub fn with_min_buffer(mut self, min_buffer: u64) -> Self {
        self.min_buffer = min_buffer;
        self
    }

    pub fn with_simulation_budget(mut self, budget: u64) -> Self {
        self.simulation_budget = budget;
        self
    }

    pub fn buffer(&self, net: u64) -> u64 {
        let proportional = net.checked_div(self.buffer_divisor).unwrap_or(0);
        proportional.max(self.min_buffer)
    }

    pub fn budget(&self, summary: &GasCostSummary) -> u64 {
        compute_gas_budget(summary, self)
    }
}

/// Budget for a simulated cost under `policy`.
pub fn compute_gas_budget(summary: &GasCostSummary, policy: &GasBudgetPolicy) -> u64 {
    let net = summary.net_cost();
    net.saturating_add(policy.buffer(net))
}

// =============================================================================
// Coin selection
// =============================================================================

/// A gas coin and its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasCoin {
    pub object_ref: ObjectRef,
    pub balance: u64,
}

impl GasCoin {
    pub fn new(object_ref: ObjectRef, balance: u64) -> Self {
        Self {
            object_ref,
            balance,
        }
    }
}

/// First-fit selection in the given order.
///
/// Takes coins until their summed balance reaches `target`. At least one coin
/// is always taken. Returns `None` when the coins cannot cover the target.
pub fn select_coins(coins: &[GasCoin], target: u64) -> Option<Vec<ObjectRef>> {
    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for coin in coins {
        selected.push(coin.object_ref);
        total = total.saturating_add(coin.balance);
        if total >= target {
            return Some(selected);
        }
    }
    None
}

// =============================================================================
// Node contract and resolver
// =============================================================================

/// Node calls the gas resolver depends on.
#[async_trait::async_trait]
pub trait GasNode: Send + Sync {
    async fn reference_gas_price(&self) -> Result<u64>;

    /// Dry-run `tx`, letting the node pick gas coins when `payment` is empty.
    async fn simulate(&self, tx: &TransactionData) -> Result<GasCostSummary>;

    /// Gas coins owned by `owner`, in the node's order.
    async fn list_coins(&self, owner: &Address) -> Result<Vec<GasCoin>>;
}

pub struct NodeGasResolver<N> {
    node: N,
    policy: GasBudgetPolicy,
}

impl<N: GasNode> NodeGasResolver<N> {
    pub fn new(node: N) -> Self {
        Self::with_policy(node, GasBudgetPolicy::default())
    }

    pub fn with_policy(node: N, policy: GasBudgetPolicy) -> Self {
        Self { node, policy }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn policy(&self) -> &GasBudgetPolicy {
        &self.policy
    }
}

#[async_trait::async_trait]
impl<N: GasNode> GasResolver for NodeGasResolver<N> {
    async fn resolve_gas_price(&self) -> Result<u64> {
        self.node.reference_gas_price().await
    }

    async fn resolve_gas_budget(&self, input: &GasBudgetInput) -> Result<u64> {
        let tx = TransactionData::new_v1(
            input.kind.clone(),
            input.sender,
            GasData {
                payment: Vec::new(),
                owner: input.gas_owner,
                price: input.gas_price,
                budget: self.policy.simulation_budget,
            },
            input.expiration,
        );
        let summary = self.node.simulate(&tx).await?;
        let budget = self.policy.budget(&summary);
        debug!(
            net = summary.net_cost(),
            budget, "estimated gas budget from simulation"
        );
        Ok(budget)
    }

    async fn resolve_gas_payment(&self, owner: &Address, budget: u64) -> Result<Vec<ObjectRef>> {
        let coins = self.node.list_coins(owner).await?;
        let available = coins
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.balance));
        let selected = select_coins(&coins, budget).ok_or_else(|| {
            anyhow!(
                "gas coins of {} hold {} in total, budget is {}",
                owner,
                available,
                budget
            )
        })?;
        debug!(%owner, coins = selected.len(), budget, "selected gas payment");
        Ok(selected)
    }
}
