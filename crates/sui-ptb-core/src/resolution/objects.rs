//! Batch fetch of object metadata for id-only inputs.

use std::collections::HashMap;

use sui_ptb_resolver::{ObjectMetadata, Resolver};
use sui_ptb_types::ObjectId;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cancellable;
use crate::error::{BuildError, BuildResult};
use crate::input::UnresolvedInput;

/// Ids of abstract inputs, first-seen order, no duplicates.
pub(crate) fn abstract_ids(inputs: &[UnresolvedInput]) -> Vec<ObjectId> {
    let mut ids: Vec<ObjectId> = Vec::new();
    for input in inputs {
        if let UnresolvedInput::Abstract(id) = input {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
    }
    ids
}

/// One resolver call for all abstract inputs. No call is made when there
/// are none.
pub(crate) async fn fetch_objects(
    inputs: &[UnresolvedInput],
    resolver: Option<&dyn Resolver>,
    token: &CancellationToken,
) -> BuildResult<HashMap<ObjectId, ObjectMetadata>> {
    let ids = abstract_ids(inputs);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let resolver = resolver.ok_or(BuildError::ResolverUnavailable(ids.len()))?;

    debug!(count = ids.len(), "resolving object inputs");
    let records = cancellable(token, resolver.resolve_objects(&ids))
        .await?
        .map_err(|e| BuildError::resolver("objects", e))?;

    if records.len() != ids.len() {
        return Err(BuildError::ResolverResponseMismatch(format!(
            "requested {} objects, received {}",
            ids.len(),
            records.len()
        )));
    }
    let mut by_id = HashMap::with_capacity(ids.len());
    for (position, (id, record)) in ids.iter().zip(records).enumerate() {
        if record.id != *id {
            return Err(BuildError::ResolverResponseMismatch(format!(
                "record {} is for {}, expected {}",
                position, record.id, id
            )));
        }
        by_id.insert(*id, record);
    }
    Ok(by_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_ptb_types::{Address, Digest, ObjectArg, ObjectRef};

    #[test]
    fn test_abstract_ids_dedup_in_order() {
        let a = Address::from_hex("0xa").unwrap();
        let b = Address::from_hex("0xb").unwrap();
        let c = Address::from_hex("0xc").unwrap();
        let inputs = vec![
            UnresolvedInput::Abstract(b),
            UnresolvedInput::Pure(vec![0]),
            UnresolvedInput::Object(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
                c,
                1,
                Digest::ZERO,
            ))),
            UnresolvedInput::Abstract(a),
            UnresolvedInput::Abstract(b),
        ];
        assert_eq!(abstract_ids(&inputs), vec![b, a]);
    }

    #[tokio::test]
    async fn test_nothing_to_fetch() {
        let out = fetch_objects(
            &[UnresolvedInput::Pure(vec![1])],
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(out.is_empty());
    }
}
