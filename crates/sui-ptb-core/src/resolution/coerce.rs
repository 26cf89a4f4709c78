//! Turn builder inputs into final call arguments.

use std::collections::HashMap;

use sui_ptb_resolver::ObjectMetadata;
use sui_ptb_types::{CallArg, ObjectArg, ObjectId, SharedObjectRef};

use super::usage::InputUsage;
use crate::error::{BuildError, BuildResult};
use crate::input::UnresolvedInput;

pub(crate) fn coerce_input(
    index: usize,
    input: &UnresolvedInput,
    usage: InputUsage,
    objects: &HashMap<ObjectId, ObjectMetadata>,
) -> BuildResult<CallArg> {
    match input {
        UnresolvedInput::Pure(bytes) => Ok(CallArg::Pure(bytes.clone())),
        // never downgrade a caller's mutable=true
        UnresolvedInput::Object(ObjectArg::SharedObject(shared)) => {
            Ok(CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
                mutable: shared.mutable || usage.mutable,
                ..*shared
            })))
        }
        UnresolvedInput::Object(arg) => Ok(CallArg::Object(*arg)),
        UnresolvedInput::Abstract(id) => {
            let metadata = objects.get(id).ok_or(BuildError::UnresolvedInput {
                index,
                object_id: *id,
            })?;
            let arg = if metadata.owner.is_consensus() {
                let initial_shared_version = metadata
                    .owner_version
                    .ok_or(BuildError::SharedVersionMissing(*id))?;
                ObjectArg::SharedObject(SharedObjectRef {
                    object_id: *id,
                    initial_shared_version,
                    mutable: usage.mutable,
                })
            } else if usage.receiving {
                ObjectArg::Receiving(metadata.object_ref())
            } else {
                ObjectArg::ImmOrOwnedObject(metadata.object_ref())
            };
            Ok(CallArg::Object(arg))
        }
    }
}

pub(crate) fn coerce_inputs(
    inputs: &[UnresolvedInput],
    usage: &[InputUsage],
    objects: &HashMap<ObjectId, ObjectMetadata>,
) -> BuildResult<Vec<CallArg>> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let flags = usage.get(index).copied().unwrap_or_default();
            coerce_input(index, input, flags, objects)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_ptb_resolver::OwnerKind;
    use sui_ptb_types::{Address, Digest, ObjectRef};

    fn id() -> ObjectId {
        Address::from_hex("0x1").unwrap()
    }

    fn objects(meta: ObjectMetadata) -> HashMap<ObjectId, ObjectMetadata> {
        HashMap::from([(meta.id, meta)])
    }

    const MUT: InputUsage = InputUsage {
        mutable: true,
        receiving: false,
    };
    const RECV: InputUsage = InputUsage {
        mutable: true,
        receiving: true,
    };

    #[test]
    fn test_shared_by_owner_kind() {
        for owner in [OwnerKind::Shared, OwnerKind::ConsensusAddress] {
            let meta = ObjectMetadata::shared(id(), 9, Digest::ZERO, 4).with_owner(owner);
            let arg = coerce_input(0, &UnresolvedInput::Abstract(id()), MUT, &objects(meta))
                .unwrap();
            assert_eq!(
                arg,
                CallArg::Object(ObjectArg::SharedObject(SharedObjectRef {
                    object_id: id(),
                    initial_shared_version: 4,
                    mutable: true,
                }))
            );
        }
    }

    #[test]
    fn test_shared_without_version_fails() {
        let mut meta = ObjectMetadata::shared(id(), 9, Digest::ZERO, 4);
        meta.owner_version = None;
        let err = coerce_input(
            0,
            &UnresolvedInput::Abstract(id()),
            InputUsage::default(),
            &objects(meta),
        )
        .unwrap_err();
        assert_eq!(err, BuildError::SharedVersionMissing(id()));
    }

    #[test]
    fn test_owned_and_receiving() {
        for owner in [
            OwnerKind::Address,
            OwnerKind::Object,
            OwnerKind::Immutable,
            OwnerKind::Unknown,
        ] {
            let meta = ObjectMetadata::owned(id(), 9, Digest::new([7; 32])).with_owner(owner);
            let expected = ObjectRef::new(id(), 9, Digest::new([7; 32]));

            let plain = coerce_input(
                0,
                &UnresolvedInput::Abstract(id()),
                InputUsage::default(),
                &objects(meta.clone()),
            )
            .unwrap();
            assert_eq!(plain, CallArg::Object(ObjectArg::ImmOrOwnedObject(expected)));

            let recv =
                coerce_input(0, &UnresolvedInput::Abstract(id()), RECV, &objects(meta)).unwrap();
            assert_eq!(recv, CallArg::Object(ObjectArg::Receiving(expected)));
        }
    }

    #[test]
    fn test_concrete_shared_overlay() {
        let declared = |mutable| {
            UnresolvedInput::Object(ObjectArg::SharedObject(SharedObjectRef {
                object_id: id(),
                initial_shared_version: 1,
                mutable,
            }))
        };
        let empty = HashMap::new();

        let raised = coerce_input(0, &declared(false), MUT, &empty).unwrap();
        assert_eq!(raised, declared(true).as_call_arg().unwrap());

        let kept = coerce_input(0, &declared(true), InputUsage::default(), &empty).unwrap();
        assert_eq!(kept, declared(true).as_call_arg().unwrap());
    }

    #[test]
    fn test_missing_record_is_unresolved() {
        let err = coerce_input(
            3,
            &UnresolvedInput::Abstract(id()),
            InputUsage::default(),
            &HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnresolvedInput {
                index: 3,
                object_id: id()
            }
        );
    }
}
