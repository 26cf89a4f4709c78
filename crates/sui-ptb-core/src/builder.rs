//! Programmable transaction builder.
//!
//! Inputs and commands are accumulated synchronously; [`TransactionBuilder::build`]
//! is the only method that talks to resolvers.
//!
//! ```ignore
//! let mut tx = TransactionBuilder::new();
//! let amount = tx.pure(&1000u64);
//! let coin = tx.split_coins(Argument::GasCoin, vec![amount]);
//! let recipient = tx.pure(&Address::from_hex("0xa11ce")?);
//! tx.transfer_objects(vec![coin], recipient);
//! tx.set_sender(sender);
//!
//! let built = tx.build(&BuildOptions::new().with_gas_resolver(gas)).await?;
//! let bytes = built.tx_bytes.expect("sender and gas resolver supplied");
//! ```
//!
//! Fluent methods never return errors. The first failure is stored and every
//! later call becomes a no-op; check it with [`TransactionBuilder::err`] or get
//! it back from `build`.

use std::collections::HashMap;

use serde::Serialize;
use sui_ptb_types::codec::encode;
use sui_ptb_types::encoding::base64_encode;
use sui_ptb_types::transaction::check_argument;
use sui_ptb_types::type_tag::{is_valid_identifier, parse_type_tag};
use sui_ptb_types::{
    Address, Argument, Command, ObjectArg, ObjectId, ObjectRef, ProgrammableMoveCall,
    ProgrammableTransaction, SharedObjectRef, TransactionData, TransactionDigest,
    TransactionExpiration, TransactionKind, TypeTag,
};
use tracing::{debug, warn};

use crate::config::{BuildOptions, BuilderConfig};
use crate::error::{BuildError, BuildResult};
use crate::gas::{self, GasConfig};
use crate::input::UnresolvedInput;
use crate::resolution;

// =============================================================================
// Build output
// =============================================================================

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTransaction {
    pub kind: TransactionKind,
    /// Canonical `TransactionKind` bytes. Always present.
    pub kind_bytes: Vec<u8>,
    /// Present only when sender and all gas fields are known.
    pub data: Option<TransactionData>,
    /// Canonical `TransactionData` bytes, alongside `data`.
    pub tx_bytes: Option<Vec<u8>>,
}

impl BuiltTransaction {
    pub fn programmable(&self) -> &ProgrammableTransaction {
        self.kind.programmable()
    }

    pub fn is_complete(&self) -> bool {
        self.tx_bytes.is_some()
    }

    pub fn kind_base64(&self) -> String {
        base64_encode(&self.kind_bytes)
    }

    pub fn tx_base64(&self) -> Option<String> {
        self.tx_bytes.as_deref().map(base64_encode)
    }

    pub fn digest(&self) -> BuildResult<Option<TransactionDigest>> {
        Ok(self.data.as_ref().map(|d| d.digest()).transpose()?)
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    config: BuilderConfig,
    inputs: Vec<UnresolvedInput>,
    /// object id -> input index, for de-duplication
    object_inputs: HashMap<ObjectId, u16>,
    commands: Vec<Command>,
    sender: Option<Address>,
    gas: GasConfig,
    expiration: TransactionExpiration,
    error: Option<BuildError>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start from an existing transaction, e.g. one decoded from bytes.
    ///
    /// Structural problems in `pt` are recorded as the builder's error.
    pub fn from_programmable(pt: ProgrammableTransaction) -> Self {
        Self::from_programmable_with_config(pt, BuilderConfig::default())
    }

    pub fn from_programmable_with_config(
        pt: ProgrammableTransaction,
        config: BuilderConfig,
    ) -> Self {
        let mut builder = Self::with_config(config);
        if let Err(e) = pt.validate() {
            warn!(error = %e, "decoded transaction failed validation");
            builder.fail(e.into());
            return builder;
        }
        for arg in pt.inputs {
            if builder.inputs.len() >= builder.config.input_limit() {
                builder.fail(BuildError::IndexOverflow {
                    what: "inputs",
                    limit: builder.config.input_limit(),
                });
                break;
            }
            let input = UnresolvedInput::from(arg);
            if let Some(id) = input.object_id() {
                let idx = builder.inputs.len() as u16;
                builder.object_inputs.entry(id).or_insert(idx);
            }
            builder.inputs.push(input);
        }
        for command in pt.commands {
            builder.command(command);
        }
        builder
    }

    /// Start from full transaction data, keeping sender, gas and expiration.
    pub fn from_transaction_data(data: TransactionData) -> Self {
        let TransactionData::V1(v1) = data;
        let TransactionKind::ProgrammableTransaction(pt) = v1.kind;
        let mut builder = Self::from_programmable(pt);
        builder.sender = Some(v1.sender);
        builder.gas = GasConfig {
            owner: Some(v1.gas_data.owner),
            price: Some(v1.gas_data.price),
            budget: Some(v1.gas_data.budget),
            payment: v1.gas_data.payment,
        };
        builder.expiration = v1.expiration;
        builder
    }

    // ==================== Accessors ====================

    /// First error recorded by a fluent method, if any.
    pub fn err(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[UnresolvedInput] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    pub fn gas_config(&self) -> &GasConfig {
        &self.gas
    }

    pub fn expiration(&self) -> TransactionExpiration {
        self.expiration
    }

    // ==================== Sender, gas, expiration ====================

    pub fn set_sender(&mut self, sender: Address) -> &mut Self {
        if self.error.is_none() {
            self.sender = Some(sender);
        }
        self
    }

    /// Sponsor paying for gas. Defaults to the sender.
    pub fn set_gas_owner(&mut self, owner: Address) -> &mut Self {
        if self.error.is_none() {
            self.gas.owner = Some(owner);
        }
        self
    }

    pub fn set_gas_price(&mut self, price: u64) -> &mut Self {
        if self.error.is_none() {
            self.gas.price = Some(price);
        }
        self
    }

    pub fn set_gas_budget(&mut self, budget: u64) -> &mut Self {
        if self.error.is_none() {
            self.gas.budget = Some(budget);
        }
        self
    }

    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) -> &mut Self {
        if self.error.is_none() {
            self.gas.payment = payment;
        }
        self
    }

    pub fn set_expiration(&mut self, expiration: TransactionExpiration) -> &mut Self {
        if self.error.is_none() {
            self.expiration = expiration;
        }
        self
    }

    // ==================== Inputs ====================

    pub fn gas_coin(&self) -> Argument {
        Argument::GasCoin
    }

    /// Canonically encode `value` as a pure input.
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        match encode(value) {
            Ok(bytes) => self.pure_bytes(bytes),
            Err(e) => self.fail(e.into()),
        }
    }

    /// Pure input from bytes already in canonical form. Never de-duplicated.
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Argument {
        self.input(UnresolvedInput::Pure(bytes))
    }

    /// Object known only by its id (hex, `0x` optional).
    pub fn object(&mut self, id: &str) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        match Address::from_hex(id) {
            Ok(id) => self.object_id(id),
            Err(e) => self.fail(e.into()),
        }
    }

    pub fn object_id(&mut self, id: ObjectId) -> Argument {
        self.input(UnresolvedInput::Abstract(id))
    }

    pub fn imm_or_owned(&mut self, object_ref: ObjectRef) -> Argument {
        self.input(UnresolvedInput::Object(ObjectArg::ImmOrOwnedObject(object_ref)))
    }

    pub fn shared_object(
        &mut self,
        object_id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    ) -> Argument {
        self.input(UnresolvedInput::Object(ObjectArg::SharedObject(
            SharedObjectRef {
                object_id,
                initial_shared_version,
                mutable,
            },
        )))
    }

    pub fn receiving(&mut self, object_ref: ObjectRef) -> Argument {
        self.input(UnresolvedInput::Object(ObjectArg::Receiving(object_ref)))
    }

    /// Add any input. Object inputs with an id already present return the
    /// existing index.
    pub fn input(&mut self, input: UnresolvedInput) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        let id = input.object_id();
        if let Some(idx) = id.and_then(|id| self.object_inputs.get(&id).copied()) {
            if let Some(existing) = self.inputs.get_mut(idx as usize) {
                existing.merge(input);
            }
            return Argument::Input(idx);
        }

        let limit = self.config.input_limit();
        if self.inputs.len() >= limit {
            return self.fail(BuildError::IndexOverflow {
                what: "inputs",
                limit,
            });
        }
        let idx = self.inputs.len() as u16;
        if let Some(id) = id {
            self.object_inputs.insert(id, idx);
        }
        self.inputs.push(input);
        Argument::Input(idx)
    }

    // ==================== Commands ====================

    /// Call `package::module::function` given as one string, e.g.
    /// `"0x2::coin::split"`, with type arguments in Move syntax.
    pub fn move_call(&mut self, target: &str, type_args: &[&str], args: Vec<Argument>) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        let (package, module, function) = match parse_move_target(target) {
            Ok(parts) => parts,
            Err(e) => return self.fail(e),
        };
        let type_arguments = match type_args
            .iter()
            .map(|t| parse_type_tag(t))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(tags) => tags,
            Err(e) => return self.fail(e.into()),
        };
        self.programmable_move_call(package, module, function, type_arguments, args)
    }

    pub fn programmable_move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        for ident in [module, function] {
            if !is_valid_identifier(ident) {
                let target = format!("{}::{}::{}", package.to_short_hex(), module, function);
                return self.fail(BuildError::InvalidMoveTarget {
                    target,
                    reason: format!("'{}' is not a valid identifier", ident),
                });
            }
        }
        self.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        })))
    }

    /// Split `amounts.len()` new coins off `coin`. Use [`Argument::nested`]
    /// on the result to address each one.
    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> Argument {
        self.command(Command::SplitCoins(coin, amounts))
    }

    pub fn merge_coins(&mut self, destination: Argument, sources: Vec<Argument>) -> Argument {
        self.command(Command::MergeCoins(destination, sources))
    }

    pub fn transfer_objects(&mut self, objects: Vec<Argument>, recipient: Argument) -> Argument {
        self.command(Command::TransferObjects(objects, recipient))
    }

    /// Publish modules. The result is the package's upgrade capability.
    pub fn publish(&mut self, modules: Vec<Vec<u8>>, dependencies: Vec<ObjectId>) -> Argument {
        self.command(Command::Publish(modules, dependencies))
    }

    pub fn make_move_vec(
        &mut self,
        element_type: Option<TypeTag>,
        elements: Vec<Argument>,
    ) -> Argument {
        self.command(Command::MakeMoveVec(element_type, elements))
    }

    pub fn upgrade(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
        package: ObjectId,
        ticket: Argument,
    ) -> Argument {
        self.command(Command::Upgrade(modules, dependencies, package, ticket))
    }

    /// Append any command after checking its argument references.
    pub fn command(&mut self, command: Command) -> Argument {
        if self.error.is_some() {
            return Argument::GasCoin;
        }
        let limit = self.config.command_limit();
        if self.commands.len() >= limit {
            return self.fail(BuildError::IndexOverflow {
                what: "commands",
                limit,
            });
        }
        let index = self.commands.len();
        for arg in command.arguments() {
            let arg = match *arg {
                Argument::NestedResult(i, _) if !self.config.check_result_arity => {
                    Argument::Result(i)
                }
                other => other,
            };
            if let Err(reason) = check_argument(arg, self.inputs.len(), &self.commands) {
                return self.fail(BuildError::InvalidArgument {
                    command: index,
                    reason,
                });
            }
        }
        self.commands.push(command);
        Argument::Result(index as u16)
    }

    // ==================== Build ====================

    /// Resolve inputs and gas, then serialize.
    ///
    /// Resolved inputs are written back only when the whole build succeeds,
    /// so a failed or cancelled build leaves the builder as it was.
    pub async fn build(&mut self, options: &BuildOptions) -> BuildResult<BuiltTransaction> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if options.cancellation.is_cancelled() {
            return Err(BuildError::Cancelled);
        }
        debug!(
            inputs = self.inputs.len(),
            commands = self.commands.len(),
            abstract_inputs = self.inputs.iter().filter(|i| i.is_abstract()).count(),
            "building transaction"
        );

        let inputs = resolution::resolve_inputs(&self.inputs, &self.commands, options).await?;
        let kind = TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
            inputs,
            commands: self.commands.clone(),
        });
        let kind_bytes = kind.to_bytes()?;

        let data = gas::resolve_transaction_data(
            &kind,
            self.sender,
            &self.gas,
            self.expiration,
            options.gas_resolver.as_deref(),
            &options.cancellation,
        )
        .await?;
        let tx_bytes = data.as_ref().map(TransactionData::to_bytes).transpose()?;

        self.inputs = kind
            .programmable()
            .inputs
            .iter()
            .cloned()
            .map(UnresolvedInput::from)
            .collect();

        debug!(
            kind_bytes = kind_bytes.len(),
            complete = tx_bytes.is_some(),
            "transaction built"
        );
        Ok(BuiltTransaction {
            kind,
            kind_bytes,
            data,
            tx_bytes,
        })
    }

    fn fail(&mut self, err: BuildError) -> Argument {
        if self.error.is_none() {
            debug!(error = %err, "builder error recorded");
            self.error = Some(err);
        }
        Argument::GasCoin
    }
}

/// Split `0xPKG::module::function`.
fn parse_move_target(target: &str) -> BuildResult<(ObjectId, &str, &str)> {
    let invalid = |reason: &str| BuildError::InvalidMoveTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };
    let parts: Vec<&str> = target.trim().split("::").collect();
    let [package, module, function] = parts.as_slice() else {
        return Err(invalid("expected package::module::function"));
    };
    let package = Address::from_hex(package).map_err(|e| invalid(&e.to_string()))?;
    Ok((package, *module, *function))
}
