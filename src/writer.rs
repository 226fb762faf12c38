// src/writer.rs

//! Vendor tree setup and descriptor file generation
//!
//! A `VendorTree` owns one `<root>/vendor/<vendor>/<device>` output
//! directory and its four descriptor files. Headers are written fresh
//! (truncating) once per invocation; every block after that is an
//! append. Callers wanting a clean regeneration start from empty files;
//! concurrent runs against the same tree are not supported.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Datelike;
use tracing::{debug, info};

use crate::classifier::{classify, ClassMode, ClassifiedList};
use crate::config::VendorConfig;
use crate::error::{Error, Result};
use crate::module::{synthesize_modules, ModuleDescriptor};
use crate::partition::Partition;

/// Counts reported after a full generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Entries written to the copy-file list
    pub copy_entries: usize,
    /// Module descriptors written to the blueprint file
    pub modules: usize,
}

/// One vendor tree output root and its descriptor files
#[derive(Debug, Clone)]
pub struct VendorTree {
    config: VendorConfig,
}

impl VendorTree {
    /// Create a vendor tree handle for one configuration
    pub fn new(config: VendorConfig) -> Self {
        Self { config }
    }

    /// The configuration this tree was built from
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    /// Create the output directory, the proprietary payload root, and
    /// the four descriptor files (empty append targets)
    ///
    /// `BoardConfigVendor.mk` is only ever created here; generation
    /// leaves it untouched for manual board configuration.
    pub fn setup(&self) -> Result<()> {
        let output = self.config.output_path();
        fs::create_dir_all(&output).map_err(|source| Error::TreeSetup {
            path: output.clone(),
            source,
        })?;
        let proprietary = self.config.proprietary_dir();
        fs::create_dir_all(&proprietary).map_err(|source| Error::TreeSetup {
            path: proprietary,
            source,
        })?;

        for path in self.config.descriptor_files() {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| Error::TreeSetup { path, source })?;
        }

        debug!("vendor tree ready at {}", output.display());
        Ok(())
    }

    /// Run the whole pipeline for one manifest
    ///
    /// Sequencing matches the generated files' expectations: headers,
    /// build guard, copy-file list, module descriptors.
    pub fn generate(&self, manifest: &str) -> Result<GenerateSummary> {
        self.setup()?;
        self.write_headers()?;
        self.write_guards()?;

        let lines: Vec<&str> = manifest.lines().collect();
        let copy = classify(lines.iter().copied(), ClassMode::Copy);
        let packaged = classify(lines.iter().copied(), ClassMode::Packaged);

        self.write_copy_files(&copy)?;
        let modules = synthesize_modules(&packaged);
        self.write_packages(&modules)?;

        info!(
            "generated {} copy entries and {} modules for {}",
            copy.len(),
            modules.len(),
            self.config.namespace()
        );
        Ok(GenerateSummary {
            copy_entries: copy.len(),
            modules: modules.len(),
        })
    }

    /// Write the license/provenance header to the three generated files
    ///
    /// Truncates: the header starts each file fresh for this invocation.
    pub fn write_headers(&self) -> Result<()> {
        let targets = [
            (self.config.vendor_mk(), "#"),
            (self.config.android_bp(), "//"),
            (self.config.android_mk(), "#"),
        ];
        for (path, marker) in targets {
            let header = self.header(marker);
            fs::write(&path, header).map_err(|source| Error::DescriptorWrite { path, source })?;
        }
        Ok(())
    }

    fn header(&self, marker: &str) -> String {
        let year = chrono::Local::now().year();
        let body = [
            String::new(),
            format!("Copyright (C) 2019-{year} The LineageOS Project"),
            String::new(),
            "Licensed under the Apache License, Version 2.0 (the \"License\");".to_string(),
            "you may not use this file except in compliance with the License.".to_string(),
            "You may obtain a copy of the License at".to_string(),
            String::new(),
            "http://www.apache.org/licenses/LICENSE-2.0".to_string(),
            String::new(),
            "Unless required by applicable law or agreed to in writing, software".to_string(),
            "distributed under the License is distributed on an \"AS IS\" BASIS,".to_string(),
            "WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.".to_string(),
            "See the License for the specific language governing permissions and".to_string(),
            "limitations under the License.".to_string(),
            String::new(),
            format!("This file is generated by {}", self.config.provenance_script()),
            String::new(),
        ];

        let mut out = String::new();
        for line in &body {
            if line.is_empty() {
                out.push_str(marker);
            } else {
                out.push_str(marker);
                out.push(' ');
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('\n');
        out
    }

    /// Append the namespace declaration and the copy-file block
    ///
    /// One line per entry: `<namespace>/proprietary/<dest>:<macro>/<dest>`,
    /// continuation marker omitted on the final line. An empty list
    /// still declares the namespace.
    pub fn write_copy_files(&self, copy: &ClassifiedList) -> Result<()> {
        let namespace = self.config.namespace();
        let mut block = String::new();
        block.push_str("PRODUCT_SOONG_NAMESPACES += \\\n");
        block.push_str(&format!("    {namespace}\n"));

        if !copy.is_empty() {
            block.push_str("\nPRODUCT_COPY_FILES += \\\n");
            let last = copy.len() - 1;
            for (position, dest) in copy.iter().enumerate() {
                let partition = Partition::resolve(dest);
                block.push_str(&format!(
                    "    {namespace}/proprietary/{dest}:{}/{dest}",
                    partition.copy_out_macro()
                ));
                if position != last {
                    block.push_str(" \\");
                }
                block.push('\n');
            }
        }

        self.append(&self.config.vendor_mk(), &block)?;
        for dest in copy {
            self.create_payload_dir(dest)?;
        }
        Ok(())
    }

    /// Append the namespace stanza and every module descriptor
    pub fn write_packages(&self, modules: &[ModuleDescriptor]) -> Result<()> {
        let mut block = String::new();
        block.push_str("soong_namespace {\n");
        block.push_str("}\n");

        for module in modules {
            block.push('\n');
            block.push_str(&module.render(&self.config.vendor));
        }

        self.append(&self.config.android_bp(), &block)?;
        for module in modules {
            for dest in module.source_paths() {
                self.create_payload_dir(dest)?;
            }
        }
        Ok(())
    }

    /// Append the build guard keyed on the device identifier
    pub fn write_guards(&self) -> Result<()> {
        let guard = format!(
            "LOCAL_PATH := $(call my-dir)\nifneq ($(filter {},$(TARGET_DEVICE)),)\nendif\n",
            self.config.device
        );
        self.append(&self.config.android_mk(), &guard)
    }

    /// Create the payload directory a destination path will later be
    /// copied into, so file placement never fails on a missing parent
    fn create_payload_dir(&self, dest: &str) -> Result<()> {
        let Some(parent) = Path::new(dest).parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        let dir = self.config.proprietary_dir().join(parent);
        fs::create_dir_all(&dir).map_err(|source| Error::TreeSetup { path: dir, source })
    }

    fn append(&self, path: &Path, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::DescriptorWrite {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(content.as_bytes())
            .map_err(|source| Error::DescriptorWrite {
                path: path.to_path_buf(),
                source,
            })
    }
}
