//! Last known footprint of every measured option.

use std::collections::{HashMap, HashSet};

use super::Geometry;

/// Geometry keyed by option identifier.
///
/// An entry exists exactly when the option has been laid out at least once
/// since it was added. Recording marks the identifier dirty so the consumer
/// tracking it can react once.
#[derive(Debug, Default)]
pub struct GeometryCache {
    entries: HashMap<String, Geometry>,
    dirty: HashSet<String>,
}

impl GeometryCache {
    /// Insert or overwrite the geometry for `identifier`.
    pub fn record(&mut self, identifier: &str, geometry: Geometry) {
        self.entries.insert(identifier.to_owned(), geometry);
        self.dirty.insert(identifier.to_owned());
    }

    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<Geometry> {
        self.entries.get(identifier).copied()
    }

    /// Drop every entry whose identifier is not in `valid`.
    pub fn prune<'a, I>(&mut self, valid: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let valid: HashSet<&str> = valid.into_iter().collect();
        self.entries.retain(|id, _| valid.contains(id.as_str()));
        self.dirty.retain(|id| valid.contains(id.as_str()));
    }

    /// Consume the dirty mark for `identifier`. Returns whether it was set.
    pub fn take_dirty(&mut self, identifier: &str) -> bool {
        self.dirty.remove(identifier)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dirty.clear();
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
