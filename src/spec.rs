// src/spec.rs

//! Manifest line grammar
//!
//! One manifest line declares one proprietary blob using the format:
//! `[#|-]src[:dst][|sha1hex]`
//!
//! - A leading `#` excludes the whole line (comment).
//! - A leading `-` marks the blob as packaged (built into a module)
//!   instead of copied verbatim.
//! - `src:dst` overrides the destination path; without `:` the
//!   destination equals the source.
//! - A trailing `|<hex>` pins the blob to a SHA-1 digest. The pin is
//!   captured as opaque text; verification happens outside this crate.
//!
//! Examples:
//! - `vendor/etc/audio/audio_platform_info.xml`
//! - `-vendor/lib64/libfoo.so`
//! - `system/app/Foo/Foo.apk|1b7b3e4a6a656836619a60780fb5e149d45ca3de`
//! - `# HWUI blobs below`

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Hex width of a SHA-1 pin
pub const SHA1_HEX_LEN: usize = 40;

/// An integrity pin captured from a manifest line
///
/// The parser never rejects a malformed pin; it only slices on the `|`
/// delimiter. `is_well_formed` reports whether the text looks like a
/// SHA-1 digest so callers can surface suspicious pins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashPin {
    /// Raw text captured after the `|` delimiter
    pub hex: String,
}

impl HashPin {
    /// Wrap captured pin text
    pub fn new(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    /// True when the pin is 40 lowercase hex characters
    pub fn is_well_formed(&self) -> bool {
        self.hex.len() == SHA1_HEX_LEN
            && self
                .hex
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }
}

impl fmt::Display for HashPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

/// Source, destination, and optional pin of one declared blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    /// Path the blob is pulled from (before `:`)
    pub source: String,
    /// Path the blob installs to (defaults to `source`)
    pub dest: String,
    /// Optional integrity pin
    pub pin: Option<HashPin>,
}

impl BlobEntry {
    fn parse(body: &str) -> Self {
        match body.split_once(':') {
            Some((source, target)) => {
                let (dest, pin) = split_pin(target);
                Self {
                    source: source.to_string(),
                    dest,
                    pin,
                }
            }
            None => {
                let (dest, pin) = split_pin(body);
                Self {
                    source: dest.clone(),
                    dest,
                    pin,
                }
            }
        }
    }
}

fn split_pin(target: &str) -> (String, Option<HashPin>) {
    match target.split_once('|') {
        Some((path, hex)) => (path.to_string(), Some(HashPin::new(hex))),
        None => (target.to_string(), None),
    }
}

/// Tagged parse result of one manifest line
///
/// Exactly one of {comment, copy, packaged} holds per entry; the kind
/// is decided once at parse time instead of re-derived from string
/// prefixes at every use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobSpec {
    /// Line excluded with a leading `#`
    Comment(String),
    /// Blob copied verbatim into its partition
    Copy(BlobEntry),
    /// Blob packaged as a build module (leading `-`)
    Packaged(BlobEntry),
}

impl BlobSpec {
    /// Parse one manifest line; returns `None` for blank lines
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(text) = line.strip_prefix('#') {
            return Some(Self::Comment(text.trim().to_string()));
        }

        // The packaged marker is only meaningful when the line is not excluded
        let (packaged, body) = match line.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        if body.is_empty() {
            return None;
        }

        let entry = BlobEntry::parse(body);
        if packaged {
            Some(Self::Packaged(entry))
        } else {
            Some(Self::Copy(entry))
        }
    }

    /// The parsed blob entry, if this line declares one
    pub fn entry(&self) -> Option<&BlobEntry> {
        match self {
            Self::Comment(_) => None,
            Self::Copy(entry) | Self::Packaged(entry) => Some(entry),
        }
    }

    /// True for excluded lines
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// True for packaged entries
    pub fn is_packaged(&self) -> bool {
        matches!(self, Self::Packaged(_))
    }
}

/// Read a manifest file as UTF-8 text
///
/// Encoding errors are fatal input errors; a manifest is text by
/// definition.
pub fn read_manifest(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::ManifestEncoding {
        path: path.to_path_buf(),
    })
}
