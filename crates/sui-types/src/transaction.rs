//! Programmable transaction data model.
//!
//! Every type here serializes to the chain's canonical byte layout through
//! the derived `Serialize` impls: enum variants are tagged by declaration
//! index, so the order of variants in this file is part of the wire format.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use serde::{Deserialize, Serialize};

use crate::address::{Address, ObjectId};
use crate::codec::{decode, encode};
use crate::digest::{Digest, ObjectDigest, TransactionDigest};
use crate::error::TypesError;
use crate::type_tag::TypeTag;

type Blake2b256 = Blake2b<U32>;

/// Domain separator hashed in front of `TransactionData` bytes.
const TRANSACTION_DATA_SALT: &[u8] = b"TransactionData::";

// =============================================================================
// Object references and inputs
// =============================================================================

/// Reference to a specific version of an owned or immutable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

impl ObjectRef {
    pub fn new(object_id: ObjectId, version: u64, digest: ObjectDigest) -> Self {
        Self {
            object_id,
            version,
            digest,
        }
    }
}

/// Reference to a shared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedObjectRef {
    pub object_id: ObjectId,
    pub initial_shared_version: u64,
    pub mutable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject(SharedObjectRef),
    Receiving(ObjectRef),
}

impl ObjectArg {
    pub fn id(&self) -> ObjectId {
        match self {
            ObjectArg::ImmOrOwnedObject(r) | ObjectArg::Receiving(r) => r.object_id,
            ObjectArg::SharedObject(s) => s.object_id,
        }
    }
}

/// A fully resolved transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallArg {
    /// Value already encoded with the canonical codec for its Move type.
    Pure(Vec<u8>),
    Object(ObjectArg),
}

// =============================================================================
// Arguments and commands
// =============================================================================

/// A value reference used inside commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

impl Argument {
    /// Turn a `Result(i)` into `NestedResult(i, j)`.
    ///
    /// Returns `None` for arguments that are not whole command results.
    pub fn nested(self, j: u16) -> Option<Argument> {
        match self {
            Argument::Result(i) => Some(Argument::NestedResult(i, j)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    /// `(objects, recipient)`
    TransferObjects(Vec<Argument>, Argument),
    /// `(coin, amounts)`
    SplitCoins(Argument, Vec<Argument>),
    /// `(destination, sources)`
    MergeCoins(Argument, Vec<Argument>),
    /// `(modules, dependencies)`
    Publish(Vec<Vec<u8>>, Vec<ObjectId>),
    /// `(element type, elements)`
    MakeMoveVec(Option<TypeTag>, Vec<Argument>),
    /// `(modules, dependencies, package, ticket)`
    Upgrade(Vec<Vec<u8>>, Vec<ObjectId>, ObjectId, Argument),
}

impl Command {
    /// Number of results this command produces, when known without
    /// consulting the chain. Move calls return `None`.
    pub fn result_arity(&self) -> Option<usize> {
        match self {
            Command::MoveCall(_) => None,
            Command::TransferObjects(..) | Command::MergeCoins(..) => Some(0),
            Command::SplitCoins(_, amounts) => Some(amounts.len()),
            Command::Publish(..) | Command::MakeMoveVec(..) | Command::Upgrade(..) => Some(1),
        }
    }

    /// All arguments referenced by this command, in encoding order.
    pub fn arguments(&self) -> Vec<&Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.iter().collect(),
            Command::TransferObjects(objects, recipient) => {
                objects.iter().chain(std::iter::once(recipient)).collect()
            }
            Command::SplitCoins(coin, amounts) => {
                std::iter::once(coin).chain(amounts.iter()).collect()
            }
            Command::MergeCoins(dest, sources) => {
                std::iter::once(dest).chain(sources.iter()).collect()
            }
            Command::Publish(..) => Vec::new(),
            Command::MakeMoveVec(_, elements) => elements.iter().collect(),
            Command::Upgrade(_, _, _, ticket) => vec![ticket],
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveCall(_) => "MoveCall",
            Command::TransferObjects(..) => "TransferObjects",
            Command::SplitCoins(..) => "SplitCoins",
            Command::MergeCoins(..) => "MergeCoins",
            Command::Publish(..) => "Publish",
            Command::MakeMoveVec(..) => "MakeMoveVec",
            Command::Upgrade(..) => "Upgrade",
        }
    }
}

// =============================================================================
// Programmable transaction
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

/// Largest number of inputs or commands addressable by a `u16` index.
pub const MAX_INDEXED_ENTRIES: usize = u16::MAX as usize + 1;

impl ProgrammableTransaction {
    /// Check index bounds for every argument.
    ///
    /// `Input(i)` must name an existing input, `Result(i)` an earlier command,
    /// and `NestedResult(i, j)` must stay inside the statically known arity of
    /// command `i`. Reports the first violation.
    pub fn validate(&self) -> Result<(), TypesError> {
        let invalid = TypesError::InvalidTransaction;
        if self.inputs.len() > MAX_INDEXED_ENTRIES {
            return Err(invalid(format!("{} inputs exceed u16 indexing", self.inputs.len())));
        }
        if self.commands.len() > MAX_INDEXED_ENTRIES {
            return Err(invalid(format!(
                "{} commands exceed u16 indexing",
                self.commands.len()
            )));
        }
        for (idx, command) in self.commands.iter().enumerate() {
            for arg in command.arguments() {
                check_argument(*arg, self.inputs.len(), &self.commands[..idx]).map_err(|reason| {
                    invalid(format!("command {} ({}): {}", idx, command.name(), reason))
                })?;
            }
        }
        Ok(())
    }
}

/// Validate one argument against the inputs and the commands preceding it.
pub fn check_argument(arg: Argument, input_count: usize, earlier: &[Command]) -> Result<(), String> {
    match arg {
        Argument::GasCoin => Ok(()),
        Argument::Input(i) => {
            if (i as usize) < input_count {
                Ok(())
            } else {
                Err(format!("Input({}) out of range ({} inputs)", i, input_count))
            }
        }
        Argument::Result(i) => {
            if (i as usize) < earlier.len() {
                Ok(())
            } else {
                Err(format!("Result({}) does not refer to an earlier command", i))
            }
        }
        Argument::NestedResult(i, j) => {
            let Some(command) = earlier.get(i as usize) else {
                return Err(format!(
                    "NestedResult({}, {}) does not refer to an earlier command",
                    i, j
                ));
            };
            match command.result_arity() {
                Some(arity) if (j as usize) >= arity => Err(format!(
                    "NestedResult({}, {}) exceeds {} result arity {}",
                    i,
                    j,
                    command.name(),
                    arity
                )),
                _ => Ok(()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

impl TransactionKind {
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        decode(bytes)
    }

    pub fn programmable(&self) -> &ProgrammableTransaction {
        match self {
            TransactionKind::ProgrammableTransaction(pt) => pt,
        }
    }
}

// =============================================================================
// Gas, expiration and transaction data
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionExpiration {
    #[default]
    None,
    Epoch(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: Address,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: Address,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    pub fn new_v1(
        kind: TransactionKind,
        sender: Address,
        gas_data: GasData,
        expiration: TransactionExpiration,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind,
            sender,
            gas_data,
            expiration,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        decode(bytes)
    }

    pub fn sender(&self) -> Address {
        match self {
            TransactionData::V1(v1) => v1.sender,
        }
    }

    pub fn gas_data(&self) -> &GasData {
        match self {
            TransactionData::V1(v1) => &v1.gas_data,
        }
    }

    pub fn kind(&self) -> &TransactionKind {
        match self {
            TransactionData::V1(v1) => &v1.kind,
        }
    }

    /// Blake2b-256 over `"TransactionData::" || bytes`.
    pub fn digest(&self) -> Result<TransactionDigest, TypesError> {
        let bytes = self.to_bytes()?;
        let mut hasher = Blake2b256::new();
        hasher.update(TRANSACTION_DATA_SALT);
        hasher.update(&bytes);
        Ok(Digest::new(hasher.finalize().into()))
    }
}
