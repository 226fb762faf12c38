// src/commands.rs

//! Command handlers for the blobforge CLI

use anyhow::{bail, Result};
use blobforge::{classify, read_manifest, ClassMode, VendorConfig, VendorTree};
use std::path::Path;
use tracing::info;

/// Generate a vendor tree from a manifest
pub fn generate(manifest: &Path, root: &Path, vendor: &str, device: &str) -> Result<()> {
    info!("reading manifest: {}", manifest.display());
    let text = read_manifest(manifest)?;

    let config = VendorConfig::new(device, vendor, root);
    let output = config.output_path();
    let tree = VendorTree::new(config);
    let summary = tree.generate(&text)?;

    println!("Generated vendor tree at: {}", output.display());
    println!("  Copy entries: {}", summary.copy_entries);
    println!("  Modules: {}", summary.modules);
    Ok(())
}

/// Print one classified category of a manifest
pub fn classify_manifest(manifest: &Path, mode: &str) -> Result<()> {
    let mode = match mode {
        "copy" => ClassMode::Copy,
        "packaged" => ClassMode::Packaged,
        other => bail!("unknown classification mode: {}", other),
    };

    let text = read_manifest(manifest)?;
    let list = classify(text.lines(), mode);
    for dest in &list {
        println!("{dest}");
    }
    info!("{} entries classified", list.len());
    Ok(())
}

/// Move a misplaced XML declaration to the top of a file
pub fn fix_xml(file: &Path) -> Result<()> {
    if blobforge::xml::promote_declaration(file)? {
        println!("Fixed XML declaration in: {}", file.display());
    } else {
        println!("No fix needed for: {}", file.display());
    }
    Ok(())
}
