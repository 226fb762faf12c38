// tests/generate_test.rs

//! Integration tests for blobforge
//!
//! These tests run the full generation pipeline against a temporary
//! vendor tree and check the emitted descriptor files.

use std::fs;

use blobforge::{VendorConfig, VendorTree};
use tempfile::tempdir;

const MANIFEST: &str = "\
# Audio
vendor/etc/audio/audio_platform_info.xml
system/etc/permissions/qti_permissions.xml|1b7b3e4a6a656836619a60780fb5e149d45ca3de

# Graphics
-vendor/lib/libllvm-glnext.so
-vendor/lib64/libllvm-glnext.so
-vendor/lib64/libgsl.so

# Apps
-system/priv-app/Setup/Setup.apk
-product/app/Gallery/Gallery.apk
-system/framework/com.qti.location.jar

# Firmware
-vendor/firmware/modem.img
";

fn generate(manifest: &str) -> (tempfile::TempDir, VendorTree) {
    let root = tempdir().unwrap();
    let tree = VendorTree::new(VendorConfig::new("guacamole", "oneplus", root.path()));
    tree.generate(manifest).unwrap();
    (root, tree)
}

#[test]
fn test_generate_creates_all_descriptor_files() {
    let (_root, tree) = generate(MANIFEST);
    for path in tree.config().descriptor_files() {
        assert!(path.exists(), "missing descriptor file {}", path.display());
    }
}

#[test]
fn test_copy_list_contents() {
    let (_root, tree) = generate(MANIFEST);
    let mk = fs::read_to_string(tree.config().vendor_mk()).unwrap();

    assert!(mk.contains("PRODUCT_SOONG_NAMESPACES += \\\n    vendor/oneplus/guacamole\n"));
    assert!(mk.contains(
        "    vendor/oneplus/guacamole/proprietary/vendor/etc/audio/audio_platform_info.xml:\
         $(TARGET_COPY_OUT_VENDOR)/vendor/etc/audio/audio_platform_info.xml"
    ));
    // The hash pin never leaks into the generated list
    assert!(mk.contains(
        "    vendor/oneplus/guacamole/proprietary/system/etc/permissions/qti_permissions.xml:\
         $(TARGET_COPY_OUT_SYSTEM)/system/etc/permissions/qti_permissions.xml"
    ));
    assert!(!mk.contains("1b7b3e4a"));
    // Packaged entries never appear in the copy list
    assert!(!mk.contains("libllvm-glnext"));
}

#[test]
fn test_copy_list_final_line_has_no_continuation() {
    let (_root, tree) = generate(MANIFEST);
    let mk = fs::read_to_string(tree.config().vendor_mk()).unwrap();
    let last = mk.lines().last().unwrap();
    assert!(last.starts_with("    vendor/oneplus/guacamole/proprietary/"));
    assert!(!last.ends_with('\\'));
}

#[test]
fn test_module_descriptors() {
    let (_root, tree) = generate(MANIFEST);
    let bp = fs::read_to_string(tree.config().android_bp()).unwrap();

    assert!(bp.contains("soong_namespace {\n}\n"));

    // Merged 32/64 library: one descriptor, both sources
    assert_eq!(bp.matches("name: \"libllvm-glnext\",").count(), 1);
    assert!(bp.contains("srcs: [\"proprietary/vendor/lib/libllvm-glnext.so\"]"));
    assert!(bp.contains("srcs: [\"proprietary/vendor/lib64/libllvm-glnext.so\"]"));
    assert!(bp.contains("compile_multilib: \"both\","));

    // Unpaired 64-bit library
    assert!(bp.contains("name: \"libgsl\","));
    assert!(bp.contains("compile_multilib: \"64\","));

    // Privileged app on the default partition
    assert!(bp.contains("name: \"Setup\","));
    assert!(bp.contains("privileged: true,"));

    // Product app carries the product flag
    assert!(bp.contains("name: \"Gallery\","));
    assert!(bp.contains("product_specific: true,"));

    // Jar import
    assert!(bp.contains("dex_import {"));
    assert!(bp.contains("jars: [\"proprietary/system/framework/com.qti.location.jar\"],"));

    // Unsupported extension becomes a placeholder, not a module
    assert!(bp.contains("// Unsupported prebuilt format: vendor/firmware/modem.img"));
    assert!(!bp.contains("name: \"modem\","));
}

#[test]
fn test_guard_file() {
    let (_root, tree) = generate(MANIFEST);
    let mk = fs::read_to_string(tree.config().android_mk()).unwrap();
    assert!(mk.contains("LOCAL_PATH := $(call my-dir)\n"));
    assert!(mk.contains("ifneq ($(filter guacamole,$(TARGET_DEVICE)),)\nendif\n"));
}

#[test]
fn test_payload_directories_created() {
    let (_root, tree) = generate(MANIFEST);
    let proprietary = tree.config().proprietary_dir();
    assert!(proprietary.join("vendor/etc/audio").is_dir());
    assert!(proprietary.join("vendor/lib64").is_dir());
    assert!(proprietary.join("system/priv-app/Setup").is_dir());
    assert!(proprietary.join("vendor/firmware").is_dir());
}

#[test]
fn test_board_config_stays_empty() {
    let (_root, tree) = generate(MANIFEST);
    let board = fs::read_to_string(tree.config().board_config_mk()).unwrap();
    assert_eq!(board, "");
}

#[test]
fn test_comment_only_manifest_emits_boilerplate_only() {
    let (_root, tree) = generate("# nothing to vendor\n# -vendor/lib/libskipped.so\n");

    let mk = fs::read_to_string(tree.config().vendor_mk()).unwrap();
    assert!(mk.contains("PRODUCT_SOONG_NAMESPACES"));
    assert!(!mk.contains("PRODUCT_COPY_FILES"));

    let bp = fs::read_to_string(tree.config().android_bp()).unwrap();
    let stanza_start = bp.find("soong_namespace {").unwrap();
    assert_eq!(&bp[stanza_start..], "soong_namespace {\n}\n");
}

#[test]
fn test_generate_is_deterministic_for_permuted_manifests() {
    let permuted: String = MANIFEST
        .lines()
        .rev()
        .map(|line| format!("{line}\n"))
        .collect();

    let (_root_a, tree_a) = generate(MANIFEST);
    let (_root_b, tree_b) = generate(&permuted);

    for (a, b) in [
        (tree_a.config().vendor_mk(), tree_b.config().vendor_mk()),
        (tree_a.config().android_bp(), tree_b.config().android_bp()),
        (tree_a.config().android_mk(), tree_b.config().android_mk()),
    ] {
        assert_eq!(
            fs::read_to_string(a).unwrap(),
            fs::read_to_string(b).unwrap(),
            "permuted manifest must generate identical output"
        );
    }
}

#[test]
fn test_generate_summary_counts() {
    let root = tempdir().unwrap();
    let tree = VendorTree::new(VendorConfig::new("guacamole", "oneplus", root.path()));
    let summary = tree.generate(MANIFEST).unwrap();
    assert_eq!(summary.copy_entries, 2);
    // merged lib + libgsl + 2 apks + jar + firmware placeholder
    assert_eq!(summary.modules, 6);
}

#[test]
fn test_blocked_output_root_is_fatal() {
    let root = tempdir().unwrap();
    let blocker = root.path().join("vendor");
    fs::write(&blocker, "").unwrap();

    let tree = VendorTree::new(VendorConfig::new("guacamole", "oneplus", root.path()));
    assert!(tree.generate(MANIFEST).is_err());
}
