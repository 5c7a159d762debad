//! Connection provider contract and shared base behavior
//!
//! One [`VfsConnectionProvider`] exists per backend kind (object storage,
//! local root, ...). Implementations supply the backend-specific pieces:
//! the basic connectivity check, location enumeration and the protocol
//! name. Everything else — root-location resolution, validation
//! orchestration, options assembly and direct-file construction — is
//! provided here and behaves identically across backends.
//!
//! Providers hold no mutable state; all per-call state lives in the
//! descriptor and the freshly allocated options bag, so a provider is safe
//! to share across threads.

pub mod local;

use std::sync::Arc;

use tracing::{debug, error};

use crate::access::{FileAccess, FileObject};
use crate::details::VfsConnectionDetails;
use crate::error::Result;
use crate::options::{FileSystemOptions, RootLocationBuilder};
use crate::registry::ConnectionRegistry;
use crate::vars::VariableScope;

/// A named location (e.g. bucket) enumerable for a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsRoot {
    pub name: String,
    pub display: String,
}

impl VfsRoot {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let display = name.clone();
        Self { name, display }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

/// Options for a full connection test.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionTestOptions {
    /// Skip the root-location resolution and existence check entirely.
    pub ignore_root_location: bool,
}

impl ConnectionTestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignoring_root_location() -> Self {
        Self {
            ignore_root_location: true,
        }
    }
}

/// Collaborators threaded through every provider call.
///
/// The default variable scope lives here rather than in process-global
/// state; descriptors without a bound scope fall back to it.
pub struct ProviderContext {
    pub registry: Arc<dyn ConnectionRegistry>,
    pub files: Arc<dyn FileAccess>,
    pub variables: VariableScope,
}

impl ProviderContext {
    /// Context with the process environment as the default scope.
    pub fn new(registry: Arc<dyn ConnectionRegistry>, files: Arc<dyn FileAccess>) -> Self {
        Self {
            registry,
            files,
            variables: VariableScope::from_env(),
        }
    }

    /// Replace the default variable scope.
    pub fn with_variables(mut self, variables: VariableScope) -> Self {
        self.variables = variables;
        self
    }
}

/// Per-backend connection provider.
///
/// Required methods are the backend-specific capability set; the provided
/// methods implement the shared semantics and are not meant to be
/// overridden, with the exception of [`extend_opts`](Self::extend_opts),
/// the designated hook for attaching backend parameters to the options bag.
pub trait VfsConnectionProvider {
    /// Descriptor type this provider understands.
    type Details: VfsConnectionDetails;

    /// Backend scheme tag (e.g. `s3`, `local`). Matches the descriptor's
    /// `scheme` and the registry's scheme index.
    fn key(&self) -> &str;

    /// Human-readable provider name.
    fn display_name(&self) -> &str;

    /// Backend-specific basic connectivity check.
    fn test_connection(&self, ctx: &ProviderContext, details: &Self::Details) -> bool;

    /// Enumerate the locations (buckets) visible to a connection.
    fn locations(&self, ctx: &ProviderContext, details: &Self::Details) -> Vec<VfsRoot>;

    /// Protocol identifier used in physical URIs for this backend.
    fn protocol(&self, details: &Self::Details) -> String;

    /// Connection names stored for this provider's scheme.
    fn names(&self, ctx: &ProviderContext) -> Vec<String> {
        ctx.registry.names_by_scheme(self.key())
    }

    /// Stored descriptors for this provider's scheme.
    fn connection_details(&self, ctx: &ProviderContext) -> Vec<Arc<dyn VfsConnectionDetails>> {
        ctx.registry.details_by_scheme(self.key())
    }

    /// Pre-use transform hook. Identity by default.
    fn prepare(&self, details: Self::Details) -> Result<Self::Details> {
        Ok(details)
    }

    /// Normalize a connection name for this backend. Identity by default.
    fn sanitize_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Effective root location of a connection, after substitution.
    ///
    /// `None` when no root is configured, or when the configured value
    /// substitutes to blank — the two cases are deliberately
    /// indistinguishable so a single absence rule applies downstream.
    fn resolved_root_location(
        &self,
        ctx: &ProviderContext,
        details: &Self::Details,
    ) -> Option<String> {
        let raw = details.root_location()?;
        if raw.is_empty() {
            return None;
        }
        let scope = details.scope().unwrap_or(&ctx.variables);
        let resolved = scope.substitute(raw);
        if resolved.trim().is_empty() {
            None
        } else {
            Some(resolved)
        }
    }

    /// Full connection test: basic connectivity first, then root-location
    /// validation. Total over `bool`; backend failures are logged and
    /// reported as invalid, never propagated.
    fn test(
        &self,
        ctx: &ProviderContext,
        details: &Self::Details,
        options: &ConnectionTestOptions,
    ) -> bool {
        if !self.test_connection(ctx, details) {
            return false;
        }

        if !details.supports_root_location() || options.ignore_root_location {
            return true;
        }

        if self.resolved_root_location(ctx, details).is_none() {
            return !details.root_location_required();
        }

        // Root configured and resolvable: probe existence at the domain path.
        let file = match self.direct_file(ctx, details, details.domain()) {
            Ok(file) => file,
            Err(e) => {
                error!(connection = details.name(), error = %e, "root location check failed");
                return false;
            }
        };
        match file.exists() {
            Ok(exists) => {
                debug!(connection = details.name(), exists, "root location checked");
                exists
            }
            Err(e) => {
                error!(connection = details.name(), error = %e, "root location check failed");
                false
            }
        }
    }

    /// Assemble the options bag handed to the file-system backend.
    ///
    /// The resolved root location is always attached first when present;
    /// backend parameters are added afterwards via
    /// [`extend_opts`](Self::extend_opts).
    fn get_opts(&self, ctx: &ProviderContext, details: &Self::Details) -> FileSystemOptions {
        let mut opts = FileSystemOptions::new();

        if details.supports_root_location() {
            if let Some(root) = self.resolved_root_location(ctx, details) {
                RootLocationBuilder::new().set_root_location(&mut opts, root);
            }
        }

        self.extend_opts(ctx, details, &mut opts);
        opts
    }

    /// Hook for backend-specific option parameters. No-op by default.
    fn extend_opts(
        &self,
        _ctx: &ProviderContext,
        _details: &Self::Details,
        _opts: &mut FileSystemOptions,
    ) {
    }

    /// Build a file handle for a path relative to the connection, bypassing
    /// the registry.
    ///
    /// A fresh empty scope is mandatory here: connection-bound variables
    /// must not feed back into resolution, or nested connection references
    /// could substitute each other without bound.
    fn direct_file(
        &self,
        ctx: &ProviderContext,
        details: &Self::Details,
        path: &str,
    ) -> Result<Box<dyn FileObject>> {
        let uri = format!("{}://{}", details.scheme(), path);
        ctx.files
            .get_file(&uri, &VariableScope::new(), &self.get_opts(ctx, details))
    }

    /// Whether bucket enumeration applies to a connection.
    ///
    /// Domain-qualified connections are excluded even when they declare
    /// bucket support: some object stores set a domain, claim buckets, and
    /// then enumerate none. Their internal path is already fixed by the
    /// domain, so bucket listing is meaningless for them. Keep the domain
    /// condition until those backend configurations are corrected.
    fn uses_buckets(&self, ctx: &ProviderContext, details: &Self::Details) -> bool {
        details.has_buckets()
            && details.domain().is_empty()
            && self.resolved_root_location(ctx, details).is_none()
    }
}
