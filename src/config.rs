// src/config.rs

//! Run configuration for one (vendor, device) generation pass
//!
//! All components take the configuration explicitly; nothing reads
//! device or vendor names from global state.

use std::path::PathBuf;

/// Immutable configuration for one vendor tree generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    /// Device codename (e.g. `guacamole`)
    pub device: String,
    /// Vendor name (e.g. `oneplus`)
    pub vendor: String,
    /// Source tree root the vendor directory is created under
    pub root: PathBuf,
}

impl VendorConfig {
    /// Create a new configuration
    pub fn new(device: impl Into<String>, vendor: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            vendor: vendor.into(),
            root: root.into(),
        }
    }

    /// Tree-relative namespace of the generated directory: `vendor/<vendor>/<device>`
    pub fn namespace(&self) -> String {
        format!("vendor/{}/{}", self.vendor, self.device)
    }

    /// Output directory: `<root>/vendor/<vendor>/<device>`
    pub fn output_path(&self) -> PathBuf {
        self.root.join("vendor").join(&self.vendor).join(&self.device)
    }

    /// Directory the proprietary payloads are later copied into
    pub fn proprietary_dir(&self) -> PathBuf {
        self.output_path().join("proprietary")
    }

    /// Path of the generated copy-file list (`<device>-vendor.mk`)
    pub fn vendor_mk(&self) -> PathBuf {
        self.output_path().join(format!("{}-vendor.mk", self.device))
    }

    /// Path of the generated module descriptor file
    pub fn android_bp(&self) -> PathBuf {
        self.output_path().join("Android.bp")
    }

    /// Path of the generated build guard file
    pub fn android_mk(&self) -> PathBuf {
        self.output_path().join("Android.mk")
    }

    /// Path of the reserved board configuration file (created empty)
    pub fn board_config_mk(&self) -> PathBuf {
        self.output_path().join("BoardConfigVendor.mk")
    }

    /// All four descriptor files owned by this vendor tree
    pub fn descriptor_files(&self) -> [PathBuf; 4] {
        [
            self.vendor_mk(),
            self.android_bp(),
            self.android_mk(),
            self.board_config_mk(),
        ]
    }

    /// Provenance line embedded in generated file headers
    pub fn provenance_script(&self) -> String {
        format!("device/{}/{}/setup-makefiles.sh", self.vendor, self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_layout() {
        let config = VendorConfig::new("guacamole", "oneplus", "/src/los");
        assert_eq!(
            config.output_path(),
            PathBuf::from("/src/los/vendor/oneplus/guacamole")
        );
        assert_eq!(config.namespace(), "vendor/oneplus/guacamole");
    }

    #[test]
    fn test_descriptor_file_names() {
        let config = VendorConfig::new("guacamole", "oneplus", "/src/los");
        let [mk, bp, guard, board] = config.descriptor_files();
        assert!(mk.ends_with("guacamole-vendor.mk"));
        assert!(bp.ends_with("Android.bp"));
        assert!(guard.ends_with("Android.mk"));
        assert!(board.ends_with("BoardConfigVendor.mk"));
    }

    #[test]
    fn test_provenance_script() {
        let config = VendorConfig::new("guacamole", "oneplus", "/src/los");
        assert_eq!(
            config.provenance_script(),
            "device/oneplus/guacamole/setup-makefiles.sh"
        );
    }
}
