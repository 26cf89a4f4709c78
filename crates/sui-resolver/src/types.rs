//! Records exchanged with resolvers.
//!
//! These are the shapes a resolver hands back to the builder. They carry just
//! enough on-chain state to turn an object id into a concrete input and to
//! decide how each Move parameter uses its argument.

use serde::{Deserialize, Serialize};
use sui_ptb_types::{
    Address, ObjectDigest, ObjectId, ObjectRef, TransactionExpiration, TransactionKind,
};

// =============================================================================
// Objects
// =============================================================================

/// Ownership of an object as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Address,
    Object,
    Shared,
    Immutable,
    ConsensusAddress,
    Unknown,
}

impl OwnerKind {
    /// Objects sequenced through consensus, which are passed as shared inputs.
    pub fn is_consensus(self) -> bool {
        matches!(self, OwnerKind::Shared | OwnerKind::ConsensusAddress)
    }
}

/// Latest known state of an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
    pub owner: OwnerKind,
    /// Initial shared version for consensus objects.
    pub owner_version: Option<u64>,
}

impl ObjectMetadata {
    pub fn owned(id: ObjectId, version: u64, digest: ObjectDigest) -> Self {
        Self {
            id,
            version,
            digest,
            owner: OwnerKind::Address,
            owner_version: None,
        }
    }

    pub fn shared(id: ObjectId, version: u64, digest: ObjectDigest, initial_version: u64) -> Self {
        Self {
            id,
            version,
            digest,
            owner: OwnerKind::Shared,
            owner_version: Some(initial_version),
        }
    }

    pub fn with_owner(mut self, owner: OwnerKind) -> Self {
        self.owner = owner;
        self
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(self.id, self.version, self.digest)
    }
}

// =============================================================================
// Move functions and packages
// =============================================================================

/// How a Move parameter receives its argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `&T`
    Immutable,
    /// `&mut T`
    Mutable,
    /// By value, or not reported.
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveParameter {
    pub reference: ReferenceKind,
    /// Type without the reference, e.g. `0x2::coin::Coin<0x2::sui::SUI>`.
    pub type_name: String,
}

impl MoveParameter {
    pub fn new(reference: ReferenceKind, type_name: impl Into<String>) -> Self {
        Self {
            reference,
            type_name: type_name.into(),
        }
    }

    pub fn immutable(type_name: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Immutable, type_name)
    }

    pub fn mutable(type_name: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Mutable, type_name)
    }

    pub fn by_value(type_name: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Unknown, type_name)
    }

    /// Whether an object passed here may be mutated. Only `&T` is read-only.
    pub fn uses_mutably(&self) -> bool {
        self.reference != ReferenceKind::Immutable
    }

    /// `0x2::transfer::Receiving` with or without type arguments.
    pub fn is_receiving(&self) -> bool {
        nominal_head_is(&self.type_name, "transfer", "Receiving")
    }

    /// `0x2::tx_context::TxContext`, supplied by the runtime.
    pub fn is_tx_context(&self) -> bool {
        nominal_head_is(&self.type_name, "tx_context", "TxContext")
    }
}

/// Compare the `address::module::name` head of a type string against a
/// framework (`0x2`) type, ignoring any generic tail.
fn nominal_head_is(type_name: &str, module: &str, name: &str) -> bool {
    let head = type_name.split('<').next().unwrap_or_default().trim();
    let mut parts = head.split("::");
    let (Some(addr), Some(m), Some(n), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    m.trim() == module
        && n.trim() == name
        && Address::from_hex(addr.trim()).is_ok_and(|a| a == Address::FRAMEWORK)
}

/// Parameter list of a Move function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFunction {
    pub parameters: Vec<MoveParameter>,
}

impl MoveFunction {
    pub fn new(parameters: Vec<MoveParameter>) -> Self {
        Self { parameters }
    }

    /// Parameters a caller supplies, i.e. without a trailing `TxContext`.
    pub fn explicit_parameters(&self) -> &[MoveParameter] {
        match self.parameters.split_last() {
            Some((last, rest)) if last.is_tx_context() => rest,
            _ => &self.parameters,
        }
    }
}

/// Package identity across upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    /// Where this version's bytecode lives.
    pub storage_id: ObjectId,
    /// Stable id of the first version; types are named by this.
    pub original_id: ObjectId,
    pub version: u64,
}

// =============================================================================
// Gas
// =============================================================================

/// Everything a gas resolver needs to estimate a budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasBudgetInput {
    pub sender: Address,
    /// Defaults to the sender when no sponsor is set.
    pub gas_owner: Address,
    pub gas_price: u64,
    pub kind: TransactionKind,
    pub expiration: TransactionExpiration,
}
