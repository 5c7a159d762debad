//! Connection registry
//!
//! The registry stores named connection descriptors and answers lookups by
//! name and by backend scheme. Persistence is out of scope; hosts that keep
//! connections in a metastore implement [`ConnectionRegistry`] themselves.
//! [`MemoryRegistry`] is the in-process reference implementation.

use std::sync::Arc;

use dashmap::DashMap;

use crate::details::VfsConnectionDetails;

/// Lookup capability over stored connections.
pub trait ConnectionRegistry: Send + Sync {
    /// Names of all connections for the given backend scheme, sorted.
    fn names_by_scheme(&self, scheme: &str) -> Vec<String>;

    /// Descriptors of all connections for the given backend scheme.
    fn details_by_scheme(&self, scheme: &str) -> Vec<Arc<dyn VfsConnectionDetails>>;

    /// Look up one connection by its stored name.
    fn get(&self, name: &str) -> Option<Arc<dyn VfsConnectionDetails>>;
}

/// Thread-safe in-memory registry keyed by connection name.
#[derive(Default)]
pub struct MemoryRegistry {
    connections: DashMap<String, Arc<dyn VfsConnectionDetails>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor under its own name, replacing any previous entry.
    pub fn register(&self, details: Arc<dyn VfsConnectionDetails>) {
        self.connections.insert(details.name().to_string(), details);
    }

    /// Remove a connection by name. Returns whether an entry existed.
    pub fn remove(&self, name: &str) -> bool {
        self.connections.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl ConnectionRegistry for MemoryRegistry {
    fn names_by_scheme(&self, scheme: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .connections
            .iter()
            .filter(|entry| entry.value().scheme() == scheme)
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    fn details_by_scheme(&self, scheme: &str) -> Vec<Arc<dyn VfsConnectionDetails>> {
        self.connections
            .iter()
            .filter(|entry| entry.value().scheme() == scheme)
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    fn get(&self, name: &str) -> Option<Arc<dyn VfsConnectionDetails>> {
        self.connections.get(name).map(|entry| Arc::clone(entry.value()))
    }
}
