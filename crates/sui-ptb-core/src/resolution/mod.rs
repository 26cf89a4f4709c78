//! Input resolution.
//!
//! Runs in three stages, each issuing resolver calls only when needed:
//!
//! 1. [`usage`] - walk commands, fetch Move signatures for calls touching
//!    id-only objects, and record mutable/receiving use per input
//! 2. [`objects`] - one batch lookup for every id-only object input
//! 3. [`coerce`] - produce the final `CallArg` list in input order
//!
//! Any failure aborts the whole pass; callers commit nothing unless every
//! stage succeeds.

mod coerce;
mod objects;
mod usage;

use std::future::Future;

use sui_ptb_types::{CallArg, Command};
use tokio_util::sync::CancellationToken;

use crate::config::BuildOptions;
use crate::error::{BuildError, BuildResult};
use crate::input::UnresolvedInput;

pub use usage::InputUsage;

/// Race a collaborator call against cancellation.
pub(crate) async fn cancellable<T>(
    token: &CancellationToken,
    fut: impl Future<Output = anyhow::Result<T>>,
) -> BuildResult<anyhow::Result<T>> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(BuildError::Cancelled),
        result = fut => Ok(result),
    }
}

pub(crate) async fn resolve_inputs(
    inputs: &[UnresolvedInput],
    commands: &[Command],
    options: &BuildOptions,
) -> BuildResult<Vec<CallArg>> {
    let resolver = options.resolver.as_deref();
    let token = &options.cancellation;

    let usage = usage::analyze_usage(inputs, commands, resolver, token).await?;
    let objects = objects::fetch_objects(inputs, resolver, token).await?;
    coerce::coerce_inputs(inputs, &usage, &objects)
}
