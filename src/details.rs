//! Connection descriptors
//!
//! A descriptor is the stored, typed configuration of one named connection.
//! Providers treat descriptors as read-only: every transformation goes
//! through `prepare`, which returns a new descriptor.

use std::collections::HashMap;

use serde::Deserialize;

use crate::vars::VariableScope;

/// Read-only view of one configured connection.
///
/// The capability flags drive the shared validation logic: a connection
/// that does not support root locations never triggers root resolution,
/// and `root_location_required` is only meaningful when
/// `supports_root_location` is true.
pub trait VfsConnectionDetails: Send + Sync {
    /// Connection name as stored in the registry.
    fn name(&self) -> &str;

    /// Backend discriminator, also the URI scheme tag (e.g. `s3`, `local`).
    fn scheme(&self) -> &str;

    /// Sub-root discriminator for backends with a bucket/domain concept.
    fn domain(&self) -> &str {
        ""
    }

    /// Configured root location, possibly containing variable references.
    fn root_location(&self) -> Option<&str> {
        None
    }

    fn supports_root_location(&self) -> bool {
        false
    }

    fn root_location_required(&self) -> bool {
        false
    }

    fn has_buckets(&self) -> bool {
        false
    }

    /// Substitution scope bound to this connection, if any. Callers fall
    /// back to the context's default scope when this is `None`.
    fn scope(&self) -> Option<&VariableScope> {
        None
    }
}

/// General-purpose descriptor deserialized from stored configuration.
///
/// Backend-specific settings (endpoints, credentials references, region
/// names) travel in `params`; the concrete provider interprets them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenericConnectionDetails {
    pub name: String,

    /// Backend type / URI scheme tag.
    #[serde(rename = "type")]
    pub scheme: String,

    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub root_location: Option<String>,

    #[serde(default)]
    pub supports_root_location: bool,

    #[serde(default)]
    pub root_location_required: bool,

    #[serde(default)]
    pub has_buckets: bool,

    /// Backend-specific string parameters.
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// Connection-bound substitution scope. Not part of the stored form;
    /// bound by the host after deserialization when present.
    #[serde(skip)]
    pub variables: Option<VariableScope>,
}

impl GenericConnectionDetails {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    /// Bind a substitution scope to this connection.
    pub fn with_scope(mut self, scope: VariableScope) -> Self {
        self.variables = Some(scope);
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl VfsConnectionDetails for GenericConnectionDetails {
    fn name(&self) -> &str {
        &self.name
    }

    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn root_location(&self) -> Option<&str> {
        self.root_location.as_deref()
    }

    fn supports_root_location(&self) -> bool {
        self.supports_root_location
    }

    fn root_location_required(&self) -> bool {
        self.root_location_required
    }

    fn has_buckets(&self) -> bool {
        self.has_buckets
    }

    fn scope(&self) -> Option<&VariableScope> {
        self.variables.as_ref()
    }
}
