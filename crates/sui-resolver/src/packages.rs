//! Package upgrade index.
//!
//! When a package is upgraded:
//! - The **original_id** stays stable - types always reference this
//! - The **storage_id** changes - this is where the new bytecode lives
//!
//! [`PackageUpgradeIndex`] keeps both directions so callers building an
//! `Upgrade` command (or naming types of an upgraded package) can translate.

use std::collections::HashMap;

use sui_ptb_types::{ObjectId, StructTag, TypeTag};

use crate::types::PackageMetadata;

#[derive(Debug, Default, Clone)]
pub struct PackageUpgradeIndex {
    /// storage_id -> original_id
    storage_to_original: HashMap<ObjectId, ObjectId>,
    /// original_id -> newest known version
    latest: HashMap<ObjectId, PackageMetadata>,
}

impl PackageUpgradeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package version. An older version never replaces a newer one
    /// as the latest storage location.
    pub fn register(&mut self, package: &PackageMetadata) {
        self.storage_to_original
            .insert(package.storage_id, package.original_id);
        let newer = self
            .latest
            .get(&package.original_id)
            .map_or(true, |known| known.version <= package.version);
        if newer {
            self.latest.insert(package.original_id, *package);
        }
    }

    /// Original id for any known storage id; unknown ids map to themselves.
    pub fn original_id(&self, id: &ObjectId) -> ObjectId {
        self.storage_to_original.get(id).copied().unwrap_or(*id)
    }

    /// Newest known storage id for an original id; unknown ids map to themselves.
    pub fn latest_storage_id(&self, original_id: &ObjectId) -> ObjectId {
        self.latest
            .get(original_id)
            .map_or(*original_id, |p| p.storage_id)
    }

    pub fn latest(&self, original_id: &ObjectId) -> Option<&PackageMetadata> {
        self.latest.get(original_id)
    }

    pub fn is_storage_id(&self, id: &ObjectId) -> bool {
        self.storage_to_original.contains_key(id)
    }

    /// Rewrite every struct address in `tag` to its original id.
    pub fn normalize_type_tag(&self, tag: &TypeTag) -> TypeTag {
        match tag {
            TypeTag::Struct(st) => TypeTag::Struct(Box::new(self.normalize_struct_tag(st))),
            TypeTag::Vector(inner) => TypeTag::Vector(Box::new(self.normalize_type_tag(inner))),
            other => other.clone(),
        }
    }

    pub fn normalize_struct_tag(&self, tag: &StructTag) -> StructTag {
        StructTag {
            address: self.original_id(&tag.address),
            module: tag.module.clone(),
            name: tag.name.clone(),
            type_params: tag
                .type_params
                .iter()
                .map(|tp| self.normalize_type_tag(tp))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
