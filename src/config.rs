//! Stored connection configuration parsing
//!
//! Connections are defined in a YAML document and resolved into
//! [`GenericConnectionDetails`] descriptors ready for registration. The raw
//! form mirrors the stored layout; `resolve()` applies validation and binds
//! per-connection variable scopes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::details::GenericConnectionDetails;
use crate::registry::MemoryRegistry;
use crate::vars::VariableScope;

// =============================================================================
// Raw Config (Deserialized from YAML)
// =============================================================================

/// Raw configuration as deserialized from YAML.
/// This is converted to `ConnectionsConfig` via `resolve()`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConnectionsConfig {
    pub connections: Vec<RawConnectionConfig>,
}

/// One stored connection entry before resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConnectionConfig {
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

    /// Variable bindings scoped to this connection.
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

// =============================================================================
// Resolved Config (Ready for registration)
// =============================================================================

/// Resolved connection set.
#[derive(Debug, Clone, Default)]
pub struct ConnectionsConfig {
    pub connections: Vec<GenericConnectionDetails>,
}

impl RawConnectionsConfig {
    /// Resolve raw entries into descriptors, validating each one.
    pub fn resolve(self) -> Result<ConnectionsConfig, ConfigError> {
        let mut seen = std::collections::HashSet::new();
        let mut connections = Vec::with_capacity(self.connections.len());

        for raw in self.connections {
            if raw.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Connection name cannot be empty".to_string(),
                ));
            }
            if raw.scheme.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Connection {:?} has no type",
                    raw.name
                )));
            }
            if raw.root_location_required && !raw.supports_root_location {
                return Err(ConfigError::ValidationError(format!(
                    "Connection {:?} requires a root location but does not support one",
                    raw.name
                )));
            }
            if !seen.insert(raw.name.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate connection name: {:?}",
                    raw.name
                )));
            }

            connections.push(Self::resolve_connection(raw));
        }

        Ok(ConnectionsConfig { connections })
    }

    fn resolve_connection(raw: RawConnectionConfig) -> GenericConnectionDetails {
        let variables = if raw.variables.is_empty() {
            None
        } else {
            let mut scope = VariableScope::new();
            for (name, value) in raw.variables {
                scope.set(name, value);
            }
            Some(scope)
        };

        GenericConnectionDetails {
            name: raw.name,
            scheme: raw.scheme,
            domain: raw.domain,
            root_location: raw.root_location,
            supports_root_location: raw.supports_root_location,
            root_location_required: raw.root_location_required,
            has_buckets: raw.has_buckets,
            params: raw.params,
            variables,
        }
    }
}

impl ConnectionsConfig {
    /// Load connection definitions from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e.to_string()))?;

        Self::from_str(&content)
    }

    /// Parse connection definitions from a YAML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConnectionsConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        raw.resolve()
    }

    /// Register every resolved connection into a registry.
    pub fn populate(&self, registry: &MemoryRegistry) {
        for details in &self.connections {
            registry.register(Arc::new(details.clone()));
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::VfsConnectionDetails;
    use crate::registry::ConnectionRegistry;

    #[test]
    fn test_parse_connections() {
        let yaml = r#"
connections:
  - name: archive
    type: s3
    supports_root_location: true
    root_location_required: true
    root_location: "${BUCKET_ROOT}"
    has_buckets: true
    params:
      endpoint: "http://localhost:9000"
    variables:
      BUCKET_ROOT: /data
  - name: docs
    type: local
    supports_root_location: true
    root_location: /srv/docs
"#;

        let config = ConnectionsConfig::from_str(yaml).unwrap();
        assert_eq!(config.connections.len(), 2);

        let archive = &config.connections[0];
        assert_eq!(archive.name(), "archive");
        assert_eq!(archive.scheme(), "s3");
        assert!(archive.has_buckets());
        assert_eq!(archive.param("endpoint"), Some("http://localhost:9000"));
        let scope = archive.scope().expect("scope bound from variables");
        assert_eq!(scope.substitute("${BUCKET_ROOT}"), "/data");

        let docs = &config.connections[1];
        assert_eq!(docs.root_location(), Some("/srv/docs"));
        assert!(!docs.root_location_required());
        assert!(docs.scope().is_none());
    }

    #[test]
    fn test_required_without_support_rejected() {
        let yaml = r#"
connections:
  - name: broken
    type: s3
    root_location_required: true
"#;

        let err = ConnectionsConfig::from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("does not support"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = r#"
connections:
  - name: docs
    type: local
  - name: docs
    type: s3
"#;

        let err = ConnectionsConfig::from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate connection name"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let yaml = r#"
connections:
  - name: "  "
    type: local
"#;

        let err = ConnectionsConfig::from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_missing_type_is_parse_error() {
        let yaml = r#"
connections:
  - name: docs
"#;

        assert!(matches!(
            ConnectionsConfig::from_str(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_populate_registry() {
        let yaml = r#"
connections:
  - name: archive
    type: s3
  - name: docs
    type: local
"#;

        let config = ConnectionsConfig::from_str(yaml).unwrap();
        let registry = MemoryRegistry::new();
        config.populate(&registry);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names_by_scheme("s3"), vec!["archive"]);
        assert!(registry.get("docs").is_some());
    }
}
