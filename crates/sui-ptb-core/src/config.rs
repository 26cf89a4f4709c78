//! Builder configuration and per-build options.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sui_ptb_resolver::{GasResolver, Resolver};
use sui_ptb_types::transaction::MAX_INDEXED_ENTRIES;
use tokio_util::sync::CancellationToken;

/// Limits and checks applied while commands are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Maximum number of inputs. Capped at the `u16` index range.
    pub max_inputs: usize,
    /// Maximum number of commands. Capped at the `u16` index range.
    pub max_commands: usize,
    /// Reject `NestedResult(i, j)` when command `i` has a known arity `<= j`.
    pub check_result_arity: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_inputs: MAX_INDEXED_ENTRIES,
            max_commands: MAX_INDEXED_ENTRIES,
            check_result_arity: true,
        }
    }
}

impl BuilderConfig {
    pub fn with_max_inputs(mut self, max: usize) -> Self {
        self.max_inputs = max;
        self
    }

    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.max_commands = max;
        self
    }

    pub fn with_result_arity_check(mut self, enabled: bool) -> Self {
        self.check_result_arity = enabled;
        self
    }

    pub(crate) fn input_limit(&self) -> usize {
        self.max_inputs.min(MAX_INDEXED_ENTRIES)
    }

    pub(crate) fn command_limit(&self) -> usize {
        self.max_commands.min(MAX_INDEXED_ENTRIES)
    }
}

/// Capabilities injected into a single `build` call.
///
/// ```ignore
/// let options = BuildOptions::new()
///     .with_resolver(resolver.clone())
///     .with_gas_resolver(gas.clone())
///     .with_cancellation(token.child_token());
/// let built = builder.build(&options).await?;
/// ```
#[derive(Clone, Default)]
pub struct BuildOptions {
    pub resolver: Option<Arc<dyn Resolver>>,
    pub gas_resolver: Option<Arc<dyn GasResolver>>,
    pub cancellation: CancellationToken,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_gas_resolver(mut self, gas_resolver: Arc<dyn GasResolver>) -> Self {
        self.gas_resolver = Some(gas_resolver);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

impl std::fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildOptions")
            .field("resolver", &self.resolver.is_some())
            .field("gas_resolver", &self.gas_resolver.is_some())
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish()
    }
}
