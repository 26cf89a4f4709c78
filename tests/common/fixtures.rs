//! Addresses, object references and resolvers used across tests.

use sui_ptb::prelude::*;
use sui_ptb::resolver::OwnerKind;

/// Parse a short or long hex address.
pub fn addr(s: &str) -> Address {
    Address::from_hex(s).unwrap()
}

/// Digest made of 32 copies of `byte`.
pub fn digest_of(byte: u8) -> Digest {
    Digest::new([byte; 32])
}

pub fn obj_ref(id: &str, version: u64, digest_byte: u8) -> ObjectRef {
    ObjectRef::new(addr(id), version, digest_of(digest_byte))
}

/// Resolver mirroring a small slice of the framework:
///
/// - `0x6` clock, shared since version 1
/// - `0xc1`, `0xc2` owned coins
/// - `0x2::coin::join(&mut Coin, Coin)`, `0x2::clock::timestamp_ms(&Clock)`
/// - `0x2::transfer::public_receive(&mut UID, Receiving<T>)`
#[allow(dead_code)]
pub fn framework_resolver() -> InMemoryResolver {
    InMemoryResolver::new()
        .with_object(ObjectMetadata::shared(addr("0x6"), 500, digest_of(6), 1))
        .with_object(ObjectMetadata::owned(addr("0xc1"), 10, digest_of(0xc1)))
        .with_object(ObjectMetadata::owned(addr("0xc2"), 11, digest_of(0xc2)))
        .with_object(
            ObjectMetadata::owned(addr("0xf0"), 3, digest_of(0xf0)).with_owner(OwnerKind::Immutable),
        )
        .with_function(
            Address::FRAMEWORK,
            "coin",
            "join",
            MoveFunction::new(vec![
                MoveParameter::mutable("0x2::coin::Coin<T0>"),
                MoveParameter::by_value("0x2::coin::Coin<T0>"),
            ]),
        )
        .with_function(
            Address::FRAMEWORK,
            "clock",
            "timestamp_ms",
            MoveFunction::new(vec![MoveParameter::immutable("0x2::clock::Clock")]),
        )
        .with_function(
            Address::FRAMEWORK,
            "transfer",
            "public_receive",
            MoveFunction::new(vec![
                MoveParameter::mutable("0x2::object::UID"),
                MoveParameter::by_value("0x2::transfer::Receiving<T0>"),
            ]),
        )
}
