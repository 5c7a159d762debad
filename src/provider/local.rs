//! Local-disk connection provider
//!
//! Reference backend for connections rooted on a local directory. There is
//! nothing to connect to, so the basic check only verifies that the
//! descriptor is self-consistent; root existence is covered by the shared
//! validation in the provider trait.

use tracing::warn;

use crate::details::{GenericConnectionDetails, VfsConnectionDetails};
use crate::options::{ConfigurationBuilder, FileSystemOptions};
use crate::provider::{ProviderContext, VfsConnectionProvider, VfsRoot};
use crate::vars::bool_of_variable;

pub const LOCAL_SCHEME: &str = "local";

/// Stored parameter holding the read-only setting. Its value may be a
/// literal boolean or the name of a connection variable.
const READ_ONLY_PARAM: &str = "read_only";

/// Builder for local-backend parameters in the options bag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConfigurationBuilder;

impl LocalConfigurationBuilder {
    const READ_ONLY: &'static str = "readOnly";

    pub fn set_read_only(&self, opts: &mut FileSystemOptions, read_only: bool) {
        self.set_param(opts, Self::READ_ONLY, read_only.to_string());
    }

    pub fn read_only(&self, opts: &FileSystemOptions) -> bool {
        self.get_param(opts, Self::READ_ONLY) == Some("true")
    }
}

impl ConfigurationBuilder for LocalConfigurationBuilder {
    fn namespace(&self) -> &'static str {
        "localFileSystem"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConnectionProvider;

impl LocalConnectionProvider {
    pub fn new() -> Self {
        Self
    }
}

impl VfsConnectionProvider for LocalConnectionProvider {
    type Details = GenericConnectionDetails;

    fn key(&self) -> &str {
        LOCAL_SCHEME
    }

    fn display_name(&self) -> &str {
        "Local directory"
    }

    fn test_connection(&self, _ctx: &ProviderContext, details: &Self::Details) -> bool {
        if details.scheme() != LOCAL_SCHEME {
            warn!(
                connection = details.name(),
                scheme = details.scheme(),
                "descriptor scheme does not match provider"
            );
            return false;
        }
        // A required root on a connection that cannot carry one is a
        // contradiction in the stored configuration.
        if details.root_location_required() && !details.supports_root_location() {
            warn!(connection = details.name(), "root required but not supported");
            return false;
        }
        true
    }

    fn locations(&self, _ctx: &ProviderContext, _details: &Self::Details) -> Vec<VfsRoot> {
        // Local connections have no bucket concept.
        Vec::new()
    }

    fn protocol(&self, _details: &Self::Details) -> String {
        "file".to_string()
    }

    fn extend_opts(
        &self,
        ctx: &ProviderContext,
        details: &Self::Details,
        opts: &mut FileSystemOptions,
    ) {
        if let Some(raw) = details.param(READ_ONLY_PARAM) {
            let scope = details.scope().unwrap_or(&ctx.variables);
            // The stored value is either a variable name or a literal.
            let read_only = bool_of_variable(scope, raw, raw);
            LocalConfigurationBuilder.set_read_only(opts, read_only);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::access::{FileObject, LocalFileAccess};
    use crate::provider::ConnectionTestOptions;
    use crate::registry::MemoryRegistry;
    use crate::vars::VariableScope;

    fn context() -> ProviderContext {
        ProviderContext::new(Arc::new(MemoryRegistry::new()), Arc::new(LocalFileAccess::new()))
            .with_variables(VariableScope::new())
    }

    fn details_with_root(root: &str) -> GenericConnectionDetails {
        let mut details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);
        details.supports_root_location = true;
        details.root_location_required = true;
        details.root_location = Some("${DOCS_ROOT}".to_string());
        details.with_scope(VariableScope::new().with("DOCS_ROOT", root))
    }

    #[test]
    fn test_existing_root_directory_validates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = details_with_root(&dir.path().to_string_lossy());

        assert!(provider.test(&ctx, &details, &ConnectionTestOptions::new()));
    }

    #[test]
    fn test_missing_root_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = details_with_root(&missing.to_string_lossy());

        assert!(!provider.test(&ctx, &details, &ConnectionTestOptions::new()));
    }

    #[test]
    fn test_missing_root_passes_when_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = details_with_root(&missing.to_string_lossy());

        assert!(provider.test(&ctx, &details, &ConnectionTestOptions::ignoring_root_location()));
    }

    #[test]
    fn test_contradictory_descriptor_fails_basic_check() {
        let ctx = context();
        let provider = LocalConnectionProvider::new();

        let mut details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);
        details.root_location_required = true;
        assert!(!provider.test_connection(&ctx, &details));

        let foreign = GenericConnectionDetails::new("docs", "s3");
        assert!(!provider.test_connection(&ctx, &foreign));
    }

    #[test]
    fn test_direct_file_resolves_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.csv"), b"x").unwrap();

        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = details_with_root(&dir.path().to_string_lossy());

        let file = provider.direct_file(&ctx, &details, "report.csv").unwrap();
        assert!(file.exists().unwrap());
        assert_eq!(file.uri(), "local://report.csv");

        let missing = provider.direct_file(&ctx, &details, "absent.csv").unwrap();
        assert!(!missing.exists().unwrap());
    }

    #[test]
    fn test_no_buckets() {
        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = details_with_root("/tmp");

        assert!(provider.locations(&ctx, &details).is_empty());
        assert!(!provider.uses_buckets(&ctx, &details));
    }

    #[test]
    fn test_read_only_literal_param() {
        let ctx = context();
        let provider = LocalConnectionProvider::new();

        let mut details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);
        details
            .params
            .insert("read_only".to_string(), "true".to_string());

        let opts = provider.get_opts(&ctx, &details);
        assert!(LocalConfigurationBuilder.read_only(&opts));
    }

    #[test]
    fn test_read_only_variable_param() {
        let ctx = context();
        let provider = LocalConnectionProvider::new();

        let mut details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);
        details
            .params
            .insert("read_only".to_string(), "DOCS_RO".to_string());
        let details = details.with_scope(VariableScope::new().with("DOCS_RO", "Y"));

        let opts = provider.get_opts(&ctx, &details);
        assert!(LocalConfigurationBuilder.read_only(&opts));
    }

    #[test]
    fn test_read_only_absent_leaves_bag_bare() {
        let ctx = context();
        let provider = LocalConnectionProvider::new();
        let details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);

        let opts = provider.get_opts(&ctx, &details);
        assert!(!LocalConfigurationBuilder.read_only(&opts));
        assert!(opts.is_empty());
    }

    #[test]
    fn test_protocol_and_display() {
        let provider = LocalConnectionProvider::new();
        let details = GenericConnectionDetails::new("docs", LOCAL_SCHEME);
        assert_eq!(provider.protocol(&details), "file");
        assert_eq!(provider.key(), "local");
        assert_eq!(provider.display_name(), "Local directory");
    }
}
