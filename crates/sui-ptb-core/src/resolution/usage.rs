//! Usage analysis: how each command uses each input.
//!
//! Coin and vector commands always take their operands mutably. Move calls
//! with at least one id-only object argument are checked against the
//! function's signature, which decides mutability and `Receiving` wrapping.

use std::collections::HashMap;

use sui_ptb_resolver::{MoveFunction, Resolver};
use sui_ptb_types::{Argument, Command, ObjectId, ProgrammableMoveCall};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::cancellable;
use crate::error::{BuildError, BuildResult};
use crate::input::UnresolvedInput;

/// Accumulated usage flags for one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputUsage {
    pub mutable: bool,
    pub receiving: bool,
}

fn input_index(arg: &Argument) -> Option<usize> {
    match arg {
        Argument::Input(i) => Some(*i as usize),
        _ => None,
    }
}

fn mark_mutable<'a>(usage: &mut [InputUsage], args: impl IntoIterator<Item = &'a Argument>) {
    for idx in args.into_iter().filter_map(input_index) {
        if let Some(slot) = usage.get_mut(idx) {
            slot.mutable = true;
        }
    }
}

/// Marks implied by the command kind alone.
pub(crate) fn mark_structural(command: &Command, usage: &mut [InputUsage]) {
    match command {
        Command::SplitCoins(coin, amounts) => {
            mark_mutable(usage, std::iter::once(coin).chain(amounts));
        }
        Command::MergeCoins(destination, sources) => {
            mark_mutable(usage, std::iter::once(destination).chain(sources));
        }
        Command::TransferObjects(objects, _) => mark_mutable(usage, objects),
        Command::MakeMoveVec(_, elements) => mark_mutable(usage, elements),
        Command::MoveCall(_) | Command::Publish(..) | Command::Upgrade(..) => {}
    }
}

fn display_target(call: &ProgrammableMoveCall) -> String {
    format!(
        "{}::{}::{}",
        call.package.to_short_hex(),
        call.module,
        call.function
    )
}

/// Walk parameters and arguments in lockstep.
pub(crate) fn apply_signature(
    call: &ProgrammableMoveCall,
    function: &MoveFunction,
    usage: &mut [InputUsage],
) -> BuildResult<()> {
    let params = function.explicit_parameters();
    if params.len() < call.arguments.len() {
        return Err(BuildError::SignatureMismatch {
            function: display_target(call),
            reason: format!(
                "{} arguments supplied but the function takes {} parameters",
                call.arguments.len(),
                params.len()
            ),
        });
    }
    for (param, arg) in params.iter().zip(&call.arguments) {
        let Some(slot) = input_index(arg).and_then(|i| usage.get_mut(i)) else {
            continue;
        };
        if param.uses_mutably() {
            slot.mutable = true;
        }
        if param.is_receiving() {
            slot.receiving = true;
        }
    }
    Ok(())
}

fn touches_abstract(call: &ProgrammableMoveCall, inputs: &[UnresolvedInput]) -> bool {
    call.arguments.iter().filter_map(input_index).any(|i| {
        inputs
            .get(i)
            .is_some_and(UnresolvedInput::is_abstract)
    })
}

/// Compute usage flags for every input.
///
/// Signatures are fetched once per distinct function, in command order.
pub(crate) async fn analyze_usage(
    inputs: &[UnresolvedInput],
    commands: &[Command],
    resolver: Option<&dyn Resolver>,
    token: &CancellationToken,
) -> BuildResult<Vec<InputUsage>> {
    let mut usage = vec![InputUsage::default(); inputs.len()];
    let mut signatures: HashMap<(ObjectId, String, String), MoveFunction> = HashMap::new();

    for command in commands {
        mark_structural(command, &mut usage);

        let Command::MoveCall(call) = command else {
            continue;
        };
        if !touches_abstract(call, inputs) {
            continue;
        }
        let resolver = resolver.ok_or_else(|| {
            BuildError::ResolverUnavailable(inputs.iter().filter(|i| i.is_abstract()).count())
        })?;

        let key = (call.package, call.module.clone(), call.function.clone());
        if !signatures.contains_key(&key) {
            trace!(function = %display_target(call), "fetching move function signature");
            let function = cancellable(
                token,
                resolver.resolve_move_function(&call.package, &call.module, &call.function),
            )
            .await?
            .map_err(|e| BuildError::resolver(format!("function {}", display_target(call)), e))?;
            signatures.insert(key.clone(), function);
        }
        if let Some(function) = signatures.get(&key) {
            apply_signature(call, function, &mut usage)?;
        }
    }

    debug!(
        inputs = inputs.len(),
        signatures = signatures.len(),
        mutable = usage.iter().filter(|u| u.mutable).count(),
        receiving = usage.iter().filter(|u| u.receiving).count(),
        "usage analysis complete"
    );
    Ok(usage)
}
