// src/error.rs

//! Error types shared across the blobforge library

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a vendor tree
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("manifest {} is not valid UTF-8", path.display())]
    ManifestEncoding { path: PathBuf },

    #[error("failed to set up vendor tree at {}: {source}", path.display())]
    TreeSetup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write descriptor file {}: {source}", path.display())]
    DescriptorWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to rewrite {}: {source}", path.display())]
    XmlRewrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result alias using the blobforge error type
pub type Result<T> = std::result::Result<T, Error>;
