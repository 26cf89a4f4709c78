//! Sui PTB
//!
//! Build, resolve, gas and sign Sui programmable transactions:
//!
//! - **Types**: canonical byte format, addresses, digests and type tags ([`types`])
//! - **Resolution**: object, Move-signature and gas lookups behind traits ([`resolver`])
//! - **Building**: the transaction builder and signing envelope ([`core`])
//!
//! Most callers only need the [`prelude`].

#![allow(clippy::result_large_err)]

pub use sui_ptb_core as core;
pub use sui_ptb_resolver as resolver;
pub use sui_ptb_types as types;

pub mod prelude {
    pub use sui_ptb_core::{
        sign_transaction, BuildError, BuildOptions, BuildResult, BuilderConfig, BuiltTransaction,
        ExecuteRequest, GasStage, SignedTransaction, Signer, TransactionBuilder, UnresolvedInput,
    };
    pub use sui_ptb_resolver::{
        CachingResolver, GasBudgetPolicy, GasResolver, InMemoryGasNode, InMemoryResolver,
        MoveFunction, MoveParameter, NodeGasResolver, ObjectMetadata, Resolver, StaticGasResolver,
    };
    pub use sui_ptb_types::{
        Address, Argument, CallArg, Command, Digest, ObjectArg, ObjectId, ObjectRef,
        ProgrammableTransaction, SharedObjectRef, TransactionData, TransactionExpiration,
        TransactionKind, TypeTag, U256,
    };
}
