//! Association runtime: target cache, writer, and the builder pipeline.

pub mod builder;
pub mod writer;

pub use builder::{
    BuilderExtension, RegisteredExtension, for_each_extension, register_extension,
};
pub use writer::write;

use std::collections::HashMap;

use crate::record::{Record, WeakRecord};

/// One cached association target.
///
/// Forward assignments hold the target strongly; inverse back-references are
/// held weakly so that mutually-linked records (including self-referential
/// ones) do not form `Arc` cycles.
#[derive(Debug, Clone)]
enum CachedTarget {
    Strong(Record),
    Weak(WeakRecord),
}

/// Per-instance cache of assigned association targets.
#[derive(Debug, Default)]
pub struct AssociationCache {
    entries: HashMap<&'static str, CachedTarget>,
}

impl AssociationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cache a forward assignment.
    pub(crate) fn set_strong(&mut self, name: &'static str, target: Record) {
        self.entries.insert(name, CachedTarget::Strong(target));
    }

    /// Cache an inverse back-reference.
    pub(crate) fn set_weak(&mut self, name: &'static str, target: WeakRecord) {
        self.entries.insert(name, CachedTarget::Weak(target));
    }

    /// Drop the cache entry for `name`.
    pub(crate) fn clear(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// The cached target for `name`, if present and still alive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Record> {
        match self.entries.get(name)? {
            CachedTarget::Strong(record) => Some(record.clone()),
            CachedTarget::Weak(weak) => weak.upgrade(),
        }
    }

    /// Whether anything is cached under `name` (alive or not).
    #[must_use]
    pub fn is_cached(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
