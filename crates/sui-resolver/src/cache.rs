//! Caching wrapper around any [`Resolver`].
//!
//! Object metadata is cached by object id, function signatures by
//! `(package, module, function)` and packages by id. Only misses are
//! forwarded to the inner resolver; batch results are reassembled in the
//! caller's request order.
//!
//! Concurrent misses for the same key may all reach the inner resolver. The
//! last response written wins.
//!
//! ```ignore
//! let resolver = Arc::new(CachingResolver::new(node_resolver));
//! let options = BuildOptions::new().with_resolver(resolver.clone());
//! builder.build(&options).await?;
//! // After executing, cached object versions are stale:
//! resolver.invalidate_objects(&touched_ids);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use sui_ptb_types::ObjectId;
use tracing::trace;

use crate::packages::PackageUpgradeIndex;
use crate::resolver::Resolver;
use crate::types::{MoveFunction, ObjectMetadata, PackageMetadata};

type FunctionKey = (ObjectId, String, String);

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct CachingResolver<R> {
    inner: R,
    objects: RwLock<HashMap<ObjectId, ObjectMetadata>>,
    functions: RwLock<HashMap<FunctionKey, MoveFunction>>,
    packages: RwLock<PackageUpgradeIndex>,
    package_by_id: RwLock<HashMap<ObjectId, PackageMetadata>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: Resolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            objects: RwLock::new(HashMap::new()),
            functions: RwLock::new(HashMap::new()),
            packages: RwLock::new(PackageUpgradeIndex::new()),
            package_by_id: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Seed or overwrite an object record.
    pub fn insert_object(&self, metadata: ObjectMetadata) {
        self.objects.write().insert(metadata.id, metadata);
    }

    /// Drop cached metadata for objects whose version moved on.
    pub fn invalidate_objects(&self, ids: &[ObjectId]) {
        let mut objects = self.objects.write();
        for id in ids {
            objects.remove(id);
        }
    }

    pub fn clear(&self) {
        self.objects.write().clear();
        self.functions.write().clear();
        self.package_by_id.write().clear();
        *self.packages.write() = PackageUpgradeIndex::new();
    }

    /// Snapshot of upgrade mappings learned from resolved packages.
    pub fn upgrade_index(&self) -> PackageUpgradeIndex {
        self.packages.read().clone()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn record(&self, hits: usize, misses: usize) {
        self.hits.fetch_add(hits as u64, Ordering::Relaxed);
        self.misses.fetch_add(misses as u64, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl<R: Resolver> Resolver for CachingResolver<R> {
    async fn resolve_objects(&self, ids: &[ObjectId]) -> Result<Vec<ObjectMetadata>> {
        let missing: Vec<ObjectId> = {
            let objects = self.objects.read();
            let mut missing = Vec::new();
            for id in ids {
                if !objects.contains_key(id) && !missing.contains(id) {
                    missing.push(*id);
                }
            }
            missing
        };
        self.record(ids.len().saturating_sub(missing.len()), missing.len());
        trace!(
            requested = ids.len(),
            missing = missing.len(),
            "object cache lookup"
        );

        // Keep fetched records local so a concurrent invalidation cannot
        // leave a hole in this response.
        let mut fetched: HashMap<ObjectId, ObjectMetadata> = HashMap::new();
        if !missing.is_empty() {
            let records = self.inner.resolve_objects(&missing).await?;
            if records.len() != missing.len() {
                return Err(anyhow!(
                    "inner resolver returned {} records for {} ids",
                    records.len(),
                    missing.len()
                ));
            }
            let mut objects = self.objects.write();
            for (id, record) in missing.iter().zip(records) {
                objects.insert(*id, record.clone());
                fetched.insert(*id, record);
            }
        }

        let objects = self.objects.read();
        ids.iter()
            .map(|id| {
                fetched
                    .get(id)
                    .or_else(|| objects.get(id))
                    .cloned()
                    .ok_or_else(|| anyhow!("object {} evicted during lookup", id))
            })
            .collect()
    }

    async fn resolve_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction> {
        let key = (*package, module.to_string(), function.to_string());
        if let Some(found) = self.functions.read().get(&key) {
            self.record(1, 0);
            trace!(%package, module, function, "function cache hit");
            return Ok(found.clone());
        }
        self.record(0, 1);
        trace!(%package, module, function, "function cache miss");

        let resolved = self
            .inner
            .resolve_move_function(package, module, function)
            .await?;
        self.functions.write().insert(key, resolved.clone());
        Ok(resolved)
    }

    async fn resolve_package(&self, package_id: &ObjectId) -> Result<PackageMetadata> {
        if let Some(found) = self.package_by_id.read().get(package_id) {
            self.record(1, 0);
            return Ok(*found);
        }
        self.record(0, 1);

        let resolved = self.inner.resolve_package(package_id).await?;
        self.package_by_id.write().insert(*package_id, resolved);
        self.packages.write().register(&resolved);
        Ok(resolved)
    }
}
