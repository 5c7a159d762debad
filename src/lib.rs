//! vfs-connect: named storage connection abstraction with a pluggable
//! provider architecture
//!
//! This library lets client code open files by logical connection name
//! instead of physical location. A stored connection descriptor is resolved
//! into a generic options bag consumable by a virtual-file-system backend.
//!
//! # Architecture
//!
//! - **Descriptors**: typed configuration of one named connection, stored
//!   in a [`registry`](crate::registry) and treated as read-only.
//! - **Providers**: one [`VfsConnectionProvider`](crate::provider::VfsConnectionProvider)
//!   per backend kind, supplying connectivity checks and location
//!   enumeration; shared root-location resolution, validation and options
//!   assembly are provided by the trait itself.
//! - **Options bag**: namespaced key/value carrier handed to the
//!   file-system backend, written through per-backend configuration
//!   builders.
//! - **File access**: the capability used to construct direct file handles
//!   that bypass the registry, avoiding recursive connection lookups.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vfs_connect::access::LocalFileAccess;
//! use vfs_connect::config::ConnectionsConfig;
//! use vfs_connect::provider::local::LocalConnectionProvider;
//! use vfs_connect::provider::{ConnectionTestOptions, ProviderContext, VfsConnectionProvider};
//! use vfs_connect::registry::MemoryRegistry;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionsConfig::from_file(&"connections.yaml".into())?;
//! let registry = Arc::new(MemoryRegistry::new());
//! config.populate(&registry);
//!
//! let ctx = ProviderContext::new(registry, Arc::new(LocalFileAccess::new()));
//! let provider = LocalConnectionProvider::new();
//!
//! for details in &config.connections {
//!     let valid = provider.test(&ctx, details, &ConnectionTestOptions::new());
//!     println!("{}: {}", details.name, if valid { "ok" } else { "invalid" });
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod config;
pub mod details;
pub mod error;
pub mod options;
pub mod provider;
pub mod registry;
pub mod vars;

pub use error::{Result, VfsConnectError};
