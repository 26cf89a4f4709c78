//! Resolution pipeline tests against in-memory resolvers.

use std::sync::Arc;

use anyhow::Result;
use sui_ptb_core::{BuildError, BuildOptions, TransactionBuilder, UnresolvedInput};
use sui_ptb_resolver::memory::ResolverCall;
use sui_ptb_resolver::{
    InMemoryResolver, MoveFunction, MoveParameter, ObjectMetadata, OwnerKind, PackageMetadata,
    Resolver,
};
use sui_ptb_types::{
    Address, Argument, CallArg, Digest, ObjectArg, ObjectId, ObjectRef, SharedObjectRef,
    TransactionKind,
};
use tokio_util::sync::CancellationToken;

fn addr(s: &str) -> Address {
    Address::from_hex(s).unwrap()
}

fn pool_package() -> ObjectId {
    addr("0x5")
}

/// Resolver with a shared pool (0x1), an owned coin (0x2), a receivable
/// object (0x3) and a shared clock (0x6).
fn fixture() -> InMemoryResolver {
    InMemoryResolver::new()
        .with_object(ObjectMetadata::shared(addr("0x1"), 40, Digest::new([1; 32]), 1))
        .with_object(ObjectMetadata::owned(addr("0x2"), 7, Digest::new([2; 32])))
        .with_object(ObjectMetadata::owned(addr("0x3"), 9, Digest::new([3; 32])))
        .with_object(ObjectMetadata::shared(addr("0x6"), 100, Digest::new([6; 32]), 1))
        .with_function(
            pool_package(),
            "pool",
            "swap",
            MoveFunction::new(vec![
                MoveParameter::mutable("0x5::pool::Pool"),
                MoveParameter::by_value("0x2::coin::Coin<0x2::sui::SUI>"),
                MoveParameter::immutable("0x2::clock::Clock"),
                MoveParameter::mutable("0x2::tx_context::TxContext"),
            ]),
        )
        .with_function(
            pool_package(),
            "pool",
            "peek",
            MoveFunction::new(vec![
                MoveParameter::immutable("0x5::pool::Pool"),
                MoveParameter::immutable("0x2::clock::Clock"),
            ]),
        )
        .with_function(
            pool_package(),
            "mailbox",
            "claim",
            MoveFunction::new(vec![
                MoveParameter::mutable("0x5::mailbox::Box"),
                MoveParameter::by_value("0x2::transfer::Receiving<0x2::coin::Coin<0x2::sui::SUI>>"),
            ]),
        )
}

fn options(resolver: Arc<dyn Resolver>) -> BuildOptions {
    BuildOptions::new().with_resolver(resolver)
}

#[tokio::test]
async fn test_shared_object_mutability_inference() {
    let resolver = Arc::new(
        InMemoryResolver::new()
            .with_object(ObjectMetadata::shared(addr("0x1"), 3, Digest::ZERO, 1))
            .with_function(
                addr("0x2"),
                "foo",
                "bar",
                MoveFunction::new(vec![MoveParameter::mutable("0x2::foo::Thing")]),
            ),
    );
    let mut tx = TransactionBuilder::new();
    let obj = tx.object("0x1");
    tx.move_call("0x2::foo::bar", &[], vec![obj]);

    let built = tx.build(&options(resolver)).await.unwrap();
    let expected = CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
        object_id: addr("0x1"),
        initial_shared_version: 1,
        mutable: true,
    }));
    assert_eq!(built.programmable().inputs, vec![expected.clone()]);

    let TransactionKind::ProgrammableTransaction(decoded) =
        TransactionKind::from_bytes(&built.kind_bytes).unwrap();
    assert_eq!(decoded.inputs, vec![expected]);
}

#[tokio::test]
async fn test_signature_driven_kinds() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let coin = tx.object("0x2");
    let clock = tx.object("0x6");
    tx.move_call("0x5::pool::swap", &[], vec![pool, coin, clock]);

    let built = tx.build(&options(resolver)).await.unwrap();
    let inputs = &built.programmable().inputs;
    assert_eq!(
        inputs[0],
        CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
            object_id: addr("0x1"),
            initial_shared_version: 1,
            mutable: true,
        }))
    );
    assert_eq!(
        inputs[1],
        CallArg::Object(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
            addr("0x2"),
            7,
            Digest::new([2; 32])
        )))
    );
    // only read through &Clock
    assert_eq!(
        inputs[2],
        CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
            object_id: addr("0x6"),
            initial_shared_version: 1,
            mutable: false,
        }))
    );
}

#[tokio::test]
async fn test_one_mutable_use_flips_shared_flag() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let clock = tx.object("0x6");
    let coin = tx.object("0x2");
    tx.move_call("0x5::pool::peek", &[], vec![pool, clock]);
    tx.move_call("0x5::pool::swap", &[], vec![pool, coin, clock]);

    let built = tx.build(&options(resolver)).await.unwrap();
    match built.programmable().inputs[0] {
        CallArg::Object(ObjectArg::SharedObject(shared)) => assert!(shared.mutable),
        ref other => panic!("unexpected input {:?}", other),
    }
    match built.programmable().inputs[1] {
        CallArg::Object(ObjectArg::SharedObject(shared)) => assert!(!shared.mutable),
        ref other => panic!("unexpected input {:?}", other),
    }
}

#[tokio::test]
async fn test_receiving_inference() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let mailbox = tx.object("0x1");
    let parcel = tx.object("0x3");
    tx.move_call("0x5::mailbox::claim", &[], vec![mailbox, parcel]);

    let built = tx.build(&options(resolver)).await.unwrap();
    assert_eq!(
        built.programmable().inputs[1],
        CallArg::Object(ObjectArg::Receiving(ObjectRef::new(
            addr("0x3"),
            9,
            Digest::new([3; 32])
        )))
    );
}

#[tokio::test]
async fn test_unreferenced_abstract_input() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    tx.object("0x1");
    tx.object("0x2");

    let built = tx.build(&options(resolver.clone())).await.unwrap();
    assert_eq!(
        built.programmable().inputs,
        vec![
            CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
                object_id: addr("0x1"),
                initial_shared_version: 1,
                mutable: false,
            })),
            CallArg::Object(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
                addr("0x2"),
                7,
                Digest::new([2; 32])
            ))),
        ]
    );
    // no Move call, so no signature lookups
    assert_eq!(
        resolver.calls(),
        vec![ResolverCall::Objects(vec![addr("0x1"), addr("0x2")])]
    );
}

#[tokio::test]
async fn test_transfer_marks_shared_mutable() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let recipient = tx.pure(&addr("0xa11ce"));
    tx.transfer_objects(vec![pool], recipient);

    let built = tx.build(&options(resolver)).await.unwrap();
    match built.programmable().inputs[0] {
        CallArg::Object(ObjectArg::SharedObject(shared)) => assert!(shared.mutable),
        ref other => panic!("unexpected input {:?}", other),
    }
}

#[tokio::test]
async fn test_resolver_call_order() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let clock = tx.object("0x6");
    let coin = tx.object("0x2");
    tx.move_call("0x5::pool::peek", &[], vec![pool, clock]);
    tx.move_call("0x5::pool::peek", &[], vec![pool, clock]);
    tx.move_call("0x5::pool::swap", &[], vec![pool, coin, clock]);
    tx.build(&options(resolver.clone())).await.unwrap();

    let function = |name: &str| ResolverCall::MoveFunction {
        package: pool_package(),
        module: "pool".into(),
        function: name.into(),
    };
    assert_eq!(
        resolver.calls(),
        vec![
            function("peek"),
            function("swap"),
            ResolverCall::Objects(vec![addr("0x1"), addr("0x6"), addr("0x2")]),
        ]
    );
}

#[tokio::test]
async fn test_concrete_inputs_need_no_resolver() {
    let mut tx = TransactionBuilder::new();
    let pool = tx.shared_object(addr("0x1"), 1, true);
    tx.move_call("0x5::pool::peek", &[], vec![pool]);

    let built = tx.build(&BuildOptions::new()).await.unwrap();
    match built.programmable().inputs[0] {
        CallArg::Object(ObjectArg::SharedObject(shared)) => assert!(shared.mutable),
        ref other => panic!("unexpected input {:?}", other),
    }
}

#[tokio::test]
async fn test_caller_mutable_flag_is_kept() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.shared_object(addr("0x1"), 1, true);
    let clock = tx.object("0x6");
    tx.move_call("0x5::pool::peek", &[], vec![pool, clock]);

    let built = tx.build(&options(resolver)).await.unwrap();
    match built.programmable().inputs[0] {
        CallArg::Object(ObjectArg::SharedObject(shared)) => assert!(shared.mutable),
        ref other => panic!("unexpected input {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_resolver() {
    let mut tx = TransactionBuilder::new();
    tx.object("0x1");
    let err = tx.build(&BuildOptions::new()).await.unwrap_err();
    assert_eq!(err, BuildError::ResolverUnavailable(1));
}

#[tokio::test]
async fn test_signature_mismatch() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let clock = tx.object("0x6");
    let extra = tx.pure(&1u64);
    tx.move_call("0x5::pool::peek", &[], vec![pool, clock, extra]);

    let err = tx.build(&options(resolver)).await.unwrap_err();
    assert!(matches!(err, BuildError::SignatureMismatch { .. }));
}

#[tokio::test]
async fn test_shared_version_missing() {
    let mut meta = ObjectMetadata::shared(addr("0x9"), 1, Digest::ZERO, 1);
    meta.owner_version = None;
    let resolver = Arc::new(InMemoryResolver::new().with_object(meta));
    let mut tx = TransactionBuilder::new();
    tx.object("0x9");

    let err = tx.build(&options(resolver)).await.unwrap_err();
    assert_eq!(err, BuildError::SharedVersionMissing(addr("0x9")));
    assert!(err.to_string().contains("missing initial shared version"));
}

#[tokio::test]
async fn test_consensus_address_owner_is_shared() {
    let meta = ObjectMetadata::shared(addr("0x9"), 4, Digest::ZERO, 2)
        .with_owner(OwnerKind::ConsensusAddress);
    let resolver = Arc::new(InMemoryResolver::new().with_object(meta));
    let mut tx = TransactionBuilder::new();
    tx.object("0x9");

    let built = tx.build(&options(resolver)).await.unwrap();
    assert!(matches!(
        built.programmable().inputs[0],
        CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
            initial_shared_version: 2,
            ..
        }))
    ));
}

#[tokio::test]
async fn test_failed_build_leaves_builder_untouched() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    tx.object("0x2");
    tx.object("0x404");

    let err = tx.build(&options(resolver)).await.unwrap_err();
    assert!(matches!(err, BuildError::ResolverFailed { .. }));
    assert!(tx.inputs().iter().all(UnresolvedInput::is_abstract));
    assert!(tx.err().is_none());
}

#[tokio::test]
async fn test_rebuild_is_idempotent() {
    let resolver = Arc::new(fixture());
    let mut tx = TransactionBuilder::new();
    let pool = tx.object("0x1");
    let coin = tx.object("0x2");
    let clock = tx.object("0x6");
    tx.move_call("0x5::pool::swap", &[], vec![pool, coin, clock]);

    let first = tx.build(&options(resolver.clone())).await.unwrap();
    resolver.clear_calls();
    let second = tx.build(&options(resolver.clone())).await.unwrap();

    assert_eq!(first.kind_bytes, second.kind_bytes);
    assert!(resolver.calls().is_empty());
}

/// Returns fewer records than requested.
struct ShortResolver;

#[async_trait::async_trait]
impl Resolver for ShortResolver {
    async fn resolve_objects(&self, _ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        Ok(vec![])
    }

    async fn resolve_move_function(
        &self,
        _package: &ObjectId,
        _module: &str,
        _function: &str,
    ) -> Result<MoveFunction> {
        Ok(MoveFunction::default())
    }

    async fn resolve_package(&self, _package_id: &ObjectId) -> Result<PackageMetadata> {
        anyhow::bail!("no packages")
    }
}

#[tokio::test]
async fn test_short_response_is_mismatch() {
    let mut tx = TransactionBuilder::new();
    tx.object("0x1");
    let err = tx.build(&options(Arc::new(ShortResolver))).await.unwrap_err();
    assert!(matches!(err, BuildError::ResolverResponseMismatch(_)));
}

/// Cancels the build's token from inside the call, then never answers.
struct CancellingResolver {
    token: CancellationToken,
}

#[async_trait::async_trait]
impl Resolver for CancellingResolver {
    async fn resolve_objects(&self, _ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        self.token.cancel();
        std::future::pending().await
    }

    async fn resolve_move_function(
        &self,
        _package: &ObjectId,
        _module: &str,
        _function: &str,
    ) -> Result<MoveFunction> {
        std::future::pending().await
    }

    async fn resolve_package(&self, _package_id: &ObjectId) -> Result<PackageMetadata> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_cancellation_during_resolution() {
    let token = CancellationToken::new();
    let resolver = Arc::new(CancellingResolver {
        token: token.clone(),
    });
    let mut tx = TransactionBuilder::new();
    tx.object("0x1");

    let err = tx
        .build(&options(resolver).with_cancellation(token))
        .await
        .unwrap_err();
    assert_eq!(err, BuildError::Cancelled);
    assert!(tx.inputs()[0].is_abstract());
}

#[tokio::test]
async fn test_cancelled_before_build() {
    let token = CancellationToken::new();
    token.cancel();
    let mut tx = TransactionBuilder::new();
    tx.pure(&1u8);
    let err = tx
        .build(&BuildOptions::new().with_cancellation(token))
        .await
        .unwrap_err();
    assert_eq!(err, BuildError::Cancelled);
}

#[tokio::test]
async fn test_split_with_no_amounts() {
    let mut tx = TransactionBuilder::new();
    let split = tx.split_coins(Argument::GasCoin, vec![]);
    assert_eq!(split, Argument::Result(0));
    let built = tx.build(&BuildOptions::new()).await.unwrap();
    assert_eq!(built.programmable().commands[0].result_arity(), Some(0));
}
