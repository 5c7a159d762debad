//! Generic file-system options bag and namespaced configuration builders
//!
//! A [`FileSystemOptions`] bag is the configuration carrier handed to a
//! file-system backend for one connection. Several backends may attach
//! parameters to the same bag, so every parameter lives under a namespace
//! tag declared by its [`ConfigurationBuilder`]. Builders with different
//! tags never observe each other's parameters.

use std::collections::HashMap;

/// Opaque key/value store partitioned by builder namespace.
///
/// A fresh bag is allocated for every `get_opts` call and owned solely by
/// that caller; bags are never shared across calls.
#[derive(Debug, Clone, Default)]
pub struct FileSystemOptions {
    params: HashMap<&'static str, HashMap<String, String>>,
}

impl FileSystemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no parameters have been attached under any namespace.
    pub fn is_empty(&self) -> bool {
        self.params.values().all(HashMap::is_empty)
    }

    fn slot_mut(&mut self, namespace: &'static str) -> &mut HashMap<String, String> {
        self.params.entry(namespace).or_default()
    }

    fn slot(&self, namespace: &'static str) -> Option<&HashMap<String, String>> {
        self.params.get(namespace)
    }
}

/// A namespaced accessor over a [`FileSystemOptions`] bag.
///
/// Concrete builders declare their namespace tag once; the get/set pair is
/// provided. Overwrites are silent and reads of unset keys return `None`.
pub trait ConfigurationBuilder {
    /// Namespace tag isolating this builder's parameters in the bag.
    fn namespace(&self) -> &'static str;

    /// Store `value` under `key` within this builder's namespace.
    fn set_param(&self, opts: &mut FileSystemOptions, key: &str, value: impl Into<String>) {
        opts.slot_mut(self.namespace())
            .insert(key.to_string(), value.into());
    }

    /// Read the value stored under `key`, if any. Never fails.
    fn get_param<'a>(&self, opts: &'a FileSystemOptions, key: &str) -> Option<&'a str> {
        opts.slot(self.namespace())
            .and_then(|slot| slot.get(key))
            .map(String::as_str)
    }
}

const ROOT_LOCATION: &str = "rootLocation";

/// Builder for the resolved root location shared by all providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootLocationBuilder;

impl RootLocationBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn set_root_location(&self, opts: &mut FileSystemOptions, root_location: impl Into<String>) {
        self.set_param(opts, ROOT_LOCATION, root_location);
    }

    pub fn root_location<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_param(opts, ROOT_LOCATION)
    }
}

impl ConfigurationBuilder for RootLocationBuilder {
    fn namespace(&self) -> &'static str {
        "defaultLocation"
    }
}
