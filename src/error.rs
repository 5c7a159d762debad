use std::io;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for vfs-connect operations
#[derive(Error, Debug)]
pub enum VfsConnectError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File access error: {0}")]
    FileAccess(String),

    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for vfs-connect operations
pub type Result<T> = std::result::Result<T, VfsConnectError>;
