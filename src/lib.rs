// src/lib.rs

//! blobforge
//!
//! Manifest-driven generator for proprietary vendor trees: reads a
//! line-oriented blob manifest and emits the descriptor files a
//! downstream device build consumes.
//!
//! # Architecture
//!
//! - Tagged parsing: each manifest line becomes a typed `BlobSpec`
//! - Deterministic classification: deduplicated, lexicographically
//!   sorted destination lists per category
//! - Partition inference from path prefixes
//! - Module synthesis with 32/64-bit shared-library merging
//! - Append-oriented descriptor writing into one vendor tree root

pub mod classifier;
pub mod config;
mod error;
pub mod module;
pub mod partition;
pub mod spec;
pub mod writer;
pub mod xml;

pub use classifier::{classify, ClassMode, ClassifiedList};
pub use config::VendorConfig;
pub use error::{Error, Result};
pub use module::{
    synthesize_modules, Arch, LibIndex, ModuleDescriptor, ModuleKind, Multilib, SharedLibSources,
};
pub use partition::Partition;
pub use spec::{read_manifest, BlobEntry, BlobSpec, HashPin};
pub use writer::{GenerateSummary, VendorTree};
