//! File-system access capability
//!
//! Providers never talk to a backend directly; they hand an access
//! identifier (`scheme://path`), a substitution scope and an options bag to
//! a [`FileAccess`] implementation and get back a [`FileObject`] handle.
//! [`LocalFileAccess`] is the reference implementation over the local disk,
//! used by the `local` provider and by tests.

use std::io;
use std::path::PathBuf;

use tracing::trace;

use crate::error::{Result, VfsConnectError};
use crate::options::{FileSystemOptions, RootLocationBuilder};
use crate::vars::VariableScope;

/// Handle to one file, obtained without going through the registry.
pub trait FileObject: Send + std::fmt::Debug {
    /// Access identifier this handle was built from.
    fn uri(&self) -> &str;

    /// Whether the file currently exists.
    ///
    /// `Ok(false)` means the backend answered and the file is absent;
    /// `Err` means the backend could not answer at all.
    fn exists(&self) -> Result<bool>;
}

/// Capability to construct file handles from access identifiers.
pub trait FileAccess: Send + Sync {
    /// Build a handle for `uri` using the given scope and options bag.
    ///
    /// Fails with [`VfsConnectError::InvalidPath`] for malformed
    /// identifiers and [`VfsConnectError::FileAccess`] when the backend
    /// cannot construct a handle.
    fn get_file(
        &self,
        uri: &str,
        scope: &VariableScope,
        opts: &FileSystemOptions,
    ) -> Result<Box<dyn FileObject>>;
}

/// Split an access identifier into scheme and path.
pub(crate) fn split_uri(uri: &str) -> Result<(&str, &str)> {
    let (scheme, path) = uri
        .split_once("://")
        .ok_or_else(|| VfsConnectError::InvalidPath(uri.to_string()))?;
    if scheme.is_empty() {
        return Err(VfsConnectError::InvalidPath(uri.to_string()));
    }
    Ok((scheme, path))
}

/// Local-disk file access for `local://` identifiers.
///
/// The path part of the identifier is variable-substituted, then resolved
/// under the root location carried in the options bag (when present).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileAccess;

impl LocalFileAccess {
    pub fn new() -> Self {
        Self
    }
}

impl FileAccess for LocalFileAccess {
    fn get_file(
        &self,
        uri: &str,
        scope: &VariableScope,
        opts: &FileSystemOptions,
    ) -> Result<Box<dyn FileObject>> {
        let (_, raw_path) = split_uri(uri)?;
        let path = scope.substitute(raw_path);

        let resolved = match RootLocationBuilder::new().root_location(opts) {
            Some(root) => {
                let mut buf = PathBuf::from(root);
                buf.push(path.trim_start_matches('/'));
                buf
            }
            None => PathBuf::from(path),
        };

        trace!(uri, path = %resolved.display(), "resolved local file");
        Ok(Box::new(LocalFileObject {
            uri: uri.to_string(),
            path: resolved,
        }))
    }
}

#[derive(Debug)]
struct LocalFileObject {
    uri: String,
    path: PathBuf,
}

impl FileObject for LocalFileObject {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn exists(&self) -> Result<bool> {
        match std::fs::metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VfsConnectError::FileAccess(format!(
                "cannot stat {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_uri() {
        assert_eq!(split_uri("local://a/b").unwrap(), ("local", "a/b"));
        assert_eq!(split_uri("s3://").unwrap(), ("s3", ""));
        assert!(split_uri("no-scheme-here").is_err());
        assert!(split_uri("://path").is_err());
    }

    #[test]
    fn test_local_exists_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("present.txt"), b"x").unwrap();

        let mut opts = FileSystemOptions::new();
        RootLocationBuilder::new()
            .set_root_location(&mut opts, dir.path().to_string_lossy().to_string());

        let access = LocalFileAccess::new();
        let scope = VariableScope::new();

        let file = access.get_file("local://present.txt", &scope, &opts).unwrap();
        assert!(file.exists().unwrap());

        let missing = access.get_file("local://absent.txt", &scope, &opts).unwrap();
        assert!(!missing.exists().unwrap());
    }

    #[test]
    fn test_local_substitutes_path_variables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.csv"), b"x").unwrap();

        let scope = VariableScope::new().with("DIR", dir.path().to_string_lossy());
        let access = LocalFileAccess::new();

        let file = access
            .get_file("local://${DIR}/report.csv", &scope, &FileSystemOptions::new())
            .unwrap();
        assert!(file.exists().unwrap());
    }

    #[test]
    fn test_malformed_uri_is_invalid_path() {
        let access = LocalFileAccess::new();
        let err = access
            .get_file("not-a-uri", &VariableScope::new(), &FileSystemOptions::new())
            .unwrap_err();
        assert!(matches!(err, VfsConnectError::InvalidPath(_)));
    }
}
