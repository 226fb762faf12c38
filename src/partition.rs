// src/partition.rs

//! Destination-path to build-partition mapping

use std::fmt;

/// Build partition a blob installs into
///
/// Derived purely from the destination path prefix; every path maps to
/// exactly one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// `vendor/` prefixed paths
    Vendor,
    /// `product/` prefixed paths
    Product,
    /// `odm/` prefixed paths
    Odm,
    /// Everything else (the default, no-suffix partition)
    System,
}

impl Partition {
    /// Resolve a destination path to its partition
    ///
    /// Prefixes are checked case-sensitively in fixed order; first
    /// match wins. A literal `product` directory nested under `vendor/`
    /// therefore resolves to vendor.
    pub fn resolve(dest: &str) -> Self {
        if dest.starts_with("vendor") {
            Self::Vendor
        } else if dest.starts_with("product") {
            Self::Product
        } else if dest.starts_with("odm") {
            Self::Odm
        } else {
            Self::System
        }
    }

    /// Get the string representation of the partition
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Product => "product",
            Self::Odm => "odm",
            Self::System => "system",
        }
    }

    /// Copy-destination macro used in the copy-file list
    pub const fn copy_out_macro(&self) -> &'static str {
        match self {
            Self::Vendor => "$(TARGET_COPY_OUT_VENDOR)",
            Self::Product => "$(TARGET_COPY_OUT_PRODUCT)",
            Self::Odm => "$(TARGET_COPY_OUT_ODM)",
            Self::System => "$(TARGET_COPY_OUT_SYSTEM)",
        }
    }

    /// Partition-specific module flag, `None` for the default partition
    pub const fn specific_flag(&self) -> Option<&'static str> {
        match self {
            Self::Vendor => Some("soc_specific: true,"),
            Self::Product => Some("product_specific: true,"),
            Self::Odm => Some("device_specific: true,"),
            Self::System => None,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
