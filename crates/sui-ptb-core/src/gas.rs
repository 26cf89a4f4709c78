//! Gas orchestration: price, then budget, then payment.
//!
//! Caller-supplied values are used verbatim and the matching stage is skipped.
//! Without a sender, or with a missing field and no gas resolver, only the
//! transaction kind can be produced; that is reported as `Ok(None)`, not an
//! error.

use sui_ptb_resolver::{GasBudgetInput, GasResolver};
use sui_ptb_types::{
    Address, GasData, ObjectRef, TransactionData, TransactionExpiration, TransactionKind,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{BuildError, BuildResult, GasStage};
use crate::resolution::cancellable;

/// Gas fields as set on the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasConfig {
    pub owner: Option<Address>,
    pub price: Option<u64>,
    pub budget: Option<u64>,
    pub payment: Vec<ObjectRef>,
}

impl GasConfig {
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.budget.is_some() && !self.payment.is_empty()
    }
}

pub(crate) async fn resolve_transaction_data(
    kind: &TransactionKind,
    sender: Option<Address>,
    gas: &GasConfig,
    expiration: TransactionExpiration,
    gas_resolver: Option<&dyn GasResolver>,
    token: &CancellationToken,
) -> BuildResult<Option<TransactionData>> {
    let Some(sender) = sender else {
        debug!("no sender set, emitting transaction kind only");
        return Ok(None);
    };
    let owner = gas.owner.unwrap_or(sender);

    let gas_resolver = match gas_resolver {
        Some(resolver) => Some(resolver),
        None if gas.is_complete() => None,
        None => {
            debug!("gas data incomplete and no gas resolver, emitting transaction kind only");
            return Ok(None);
        }
    };

    let price = match gas.price {
        Some(price) => {
            debug!(price, "using caller gas price");
            price
        }
        None => {
            let resolver = require(gas_resolver, GasStage::Price)?;
            let price = cancellable(token, resolver.resolve_gas_price())
                .await?
                .map_err(|e| BuildError::gas(GasStage::Price, format!("{:#}", e)))?;
            debug!(price, "resolved gas price");
            price
        }
    };

    let budget = match gas.budget {
        Some(budget) => {
            debug!(budget, "using caller gas budget");
            budget
        }
        None => {
            let resolver = require(gas_resolver, GasStage::Budget)?;
            let input = GasBudgetInput {
                sender,
                gas_owner: owner,
                gas_price: price,
                kind: kind.clone(),
                expiration,
            };
            let budget = cancellable(token, resolver.resolve_gas_budget(&input))
                .await?
                .map_err(|e| BuildError::gas(GasStage::Budget, format!("{:#}", e)))?;
            debug!(budget, "resolved gas budget");
            budget
        }
    };

    let payment = if gas.payment.is_empty() {
        let resolver = require(gas_resolver, GasStage::Payment)?;
        let payment = cancellable(token, resolver.resolve_gas_payment(&owner, budget))
            .await?
            .map_err(|e| BuildError::gas(GasStage::Payment, format!("{:#}", e)))?;
        if payment.is_empty() {
            return Err(BuildError::gas(
                GasStage::Payment,
                format!("no gas coins returned for {}", owner),
            ));
        }
        debug!(coins = payment.len(), "resolved gas payment");
        payment
    } else {
        gas.payment.clone()
    };

    Ok(Some(TransactionData::new_v1(
        kind.clone(),
        sender,
        GasData {
            payment,
            owner,
            price,
            budget,
        },
        expiration,
    )))
}

fn require(resolver: Option<&dyn GasResolver>, stage: GasStage) -> BuildResult<&dyn GasResolver> {
    resolver.ok_or_else(|| BuildError::gas(stage, "no gas resolver supplied"))
}
