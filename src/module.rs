// src/module.rs

//! Module synthesis for packaged blobs
//!
//! Every packaged destination path becomes exactly one module
//! descriptor. The kind is inferred from the file extension; shared
//! libraries declared once for 32-bit and once for 64-bit collapse into
//! a single multilib descriptor carrying both sources.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::classifier::ClassifiedList;
use crate::partition::Partition;

/// Target architecture of a single-arch shared library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// 32-bit (`android_arm`)
    Arm,
    /// 64-bit (`android_arm64`)
    Arm64,
}

impl Arch {
    /// Soong target block key
    pub const fn target_key(&self) -> &'static str {
        match self {
            Self::Arm => "android_arm",
            Self::Arm64 => "android_arm64",
        }
    }
}

/// Multilib policy of a shared-library descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multilib {
    /// 32-bit only
    Lib32,
    /// 64-bit only
    Lib64,
    /// Merged 32-bit and 64-bit variants
    Both,
}

impl Multilib {
    /// Value of the `compile_multilib` property
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lib32 => "32",
            Self::Lib64 => "64",
            Self::Both => "both",
        }
    }
}

/// Architecture-tagged sources of a shared-library descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedLibSources {
    /// Only one architecture variant was declared
    Single { arch: Arch, src: String },
    /// Both variants were declared and merged into one descriptor
    Both { src32: String, src64: String },
}

impl SharedLibSources {
    /// Multilib policy implied by the sources
    pub fn multilib(&self) -> Multilib {
        match self {
            Self::Single { arch: Arch::Arm, .. } => Multilib::Lib32,
            Self::Single { arch: Arch::Arm64, .. } => Multilib::Lib64,
            Self::Both { .. } => Multilib::Both,
        }
    }
}

/// Module kind inferred from the packaged file's extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    /// `.apk` application package
    AppImport { src: String, privileged: bool },
    /// `.jar` archive import
    DexImport { src: String },
    /// `.so` native shared library
    SharedLib(SharedLibSources),
    /// Anything else; emitted as a placeholder, never a hard failure
    Unsupported { dest: String },
}

/// One synthesized build module
///
/// Write-once: rendered into the output stream exactly once and never
/// revisited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Module name, derived from the filename stem
    pub name: String,
    /// Kind plus kind-specific sources and flags
    pub kind: ModuleKind,
    /// Partition the module installs into
    pub partition: Partition,
}

impl ModuleDescriptor {
    /// Destination paths this module references
    pub fn source_paths(&self) -> Vec<&str> {
        match &self.kind {
            ModuleKind::AppImport { src, .. } | ModuleKind::DexImport { src } => vec![src],
            ModuleKind::SharedLib(SharedLibSources::Single { src, .. }) => vec![src],
            ModuleKind::SharedLib(SharedLibSources::Both { src32, src64 }) => {
                vec![src32, src64]
            }
            ModuleKind::Unsupported { dest } => vec![dest],
        }
    }

    /// Render the descriptor as one blueprint stanza
    pub fn render(&self, owner: &str) -> String {
        match &self.kind {
            ModuleKind::AppImport { src, privileged } => {
                let mut out = String::new();
                out.push_str("android_app_import {\n");
                out.push_str(&format!("    name: \"{}\",\n", self.name));
                out.push_str(&format!("    owner: \"{owner}\",\n"));
                out.push_str(&format!("    apk: \"proprietary/{src}\",\n"));
                out.push_str("    certificate: \"platform\",\n");
                if *privileged {
                    out.push_str("    privileged: true,\n");
                }
                out.push_str("    dex_preopt: {\n");
                out.push_str("        enabled: false,\n");
                out.push_str("    },\n");
                if let Some(flag) = self.partition.specific_flag() {
                    out.push_str(&format!("    {flag}\n"));
                }
                out.push_str("}\n");
                out
            }
            ModuleKind::DexImport { src } => {
                let mut out = String::new();
                out.push_str("dex_import {\n");
                out.push_str(&format!("    name: \"{}\",\n", self.name));
                out.push_str(&format!("    owner: \"{owner}\",\n"));
                out.push_str(&format!("    jars: [\"proprietary/{src}\"],\n"));
                if let Some(flag) = self.partition.specific_flag() {
                    out.push_str(&format!("    {flag}\n"));
                }
                out.push_str("}\n");
                out
            }
            ModuleKind::SharedLib(sources) => {
                let mut out = String::new();
                out.push_str("cc_prebuilt_library_shared {\n");
                out.push_str(&format!("    name: \"{}\",\n", self.name));
                out.push_str(&format!("    owner: \"{owner}\",\n"));
                out.push_str("    strip: {\n");
                out.push_str("        none: true,\n");
                out.push_str("    },\n");
                out.push_str("    target: {\n");
                match sources {
                    SharedLibSources::Single { arch, src } => {
                        out.push_str(&format!("        {}: {{\n", arch.target_key()));
                        out.push_str(&format!("            srcs: [\"proprietary/{src}\"],\n"));
                        out.push_str("        },\n");
                    }
                    SharedLibSources::Both { src32, src64 } => {
                        out.push_str("        android_arm: {\n");
                        out.push_str(&format!("            srcs: [\"proprietary/{src32}\"],\n"));
                        out.push_str("        },\n");
                        out.push_str("        android_arm64: {\n");
                        out.push_str(&format!("            srcs: [\"proprietary/{src64}\"],\n"));
                        out.push_str("        },\n");
                    }
                }
                out.push_str("    },\n");
                out.push_str(&format!(
                    "    compile_multilib: \"{}\",\n",
                    sources.multilib().as_str()
                ));
                out.push_str("    prefer: true,\n");
                if let Some(flag) = self.partition.specific_flag() {
                    out.push_str(&format!("    {flag}\n"));
                }
                out.push_str("}\n");
                out
            }
            ModuleKind::Unsupported { dest } => {
                format!("// Unsupported prebuilt format: {dest}\n")
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct LibVariants {
    lib32: Option<String>,
    lib64: Option<String>,
}

/// Index of shared-library architecture variants
///
/// Keyed by (64-normalized containing directory, file name): the 32-bit
/// `vendor/lib` and 64-bit `vendor/lib64` copies of a library share one
/// key, so the merge never reconstructs sibling paths by string surgery.
#[derive(Debug, Clone, Default)]
pub struct LibIndex {
    variants: HashMap<(String, String), LibVariants>,
}

impl LibIndex {
    /// Build the index over every `.so` path in a packaged list
    pub fn build(packaged: &ClassifiedList) -> Self {
        let mut variants: HashMap<(String, String), LibVariants> = HashMap::new();

        for dest in packaged {
            if Path::new(dest).extension().and_then(|e| e.to_str()) != Some("so") {
                continue;
            }
            let (dir, file) = split_dir_file(dest);
            let (canonical, is_64) = normalize_lib_dir(dir);
            let slot = variants
                .entry((canonical.to_string(), file.to_string()))
                .or_default();
            if is_64 {
                slot.lib64 = Some(dest.clone());
            } else {
                slot.lib32 = Some(dest.clone());
            }
        }

        Self { variants }
    }

    fn lookup(&self, dest: &str) -> Option<&LibVariants> {
        let (dir, file) = split_dir_file(dest);
        let (canonical, _) = normalize_lib_dir(dir);
        self.variants.get(&(canonical.to_string(), file.to_string()))
    }
}

fn split_dir_file(dest: &str) -> (&str, &str) {
    match dest.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", dest),
    }
}

/// Strip the `64` suffix a 64-bit library directory carries, reporting
/// whether it was present
fn normalize_lib_dir(dir: &str) -> (&str, bool) {
    match dir.strip_suffix("64") {
        Some(stripped) => (stripped, true),
        None => (dir, false),
    }
}

/// Synthesize one descriptor per physical blob in a packaged list
///
/// A merged 32/64 pair is emitted once, at whichever variant sorts
/// first; the sibling is consumed and never revisited. Each input path
/// contributes to exactly one descriptor.
pub fn synthesize_modules(packaged: &ClassifiedList) -> Vec<ModuleDescriptor> {
    let index = LibIndex::build(packaged);
    let mut consumed: HashSet<String> = HashSet::new();
    let mut modules = Vec::new();

    for dest in packaged {
        if consumed.contains(dest.as_str()) {
            continue;
        }
        modules.push(synthesize_one(dest, &index, &mut consumed));
    }

    modules
}

fn synthesize_one(
    dest: &str,
    index: &LibIndex,
    consumed: &mut HashSet<String>,
) -> ModuleDescriptor {
    let path = Path::new(dest);
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| dest.to_string());
    let partition = Partition::resolve(dest);
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let kind = match extension {
        "apk" => ModuleKind::AppImport {
            src: dest.to_string(),
            privileged: dest.split('/').any(|segment| segment == "priv-app"),
        },
        "jar" => ModuleKind::DexImport {
            src: dest.to_string(),
        },
        "so" => synthesize_shared_lib(dest, index, consumed),
        _ => {
            warn!("no module format for packaged file: {dest}");
            ModuleKind::Unsupported {
                dest: dest.to_string(),
            }
        }
    };

    ModuleDescriptor {
        name,
        kind,
        partition,
    }
}

fn synthesize_shared_lib(
    dest: &str,
    index: &LibIndex,
    consumed: &mut HashSet<String>,
) -> ModuleKind {
    if let Some(LibVariants {
        lib32: Some(src32),
        lib64: Some(src64),
    }) = index.lookup(dest)
    {
        consumed.insert(src32.clone());
        consumed.insert(src64.clone());
        return ModuleKind::SharedLib(SharedLibSources::Both {
            src32: src32.clone(),
            src64: src64.clone(),
        });
    }

    // Missing sibling is not an error; fall back to a single-arch
    // descriptor inferred from the path layout.
    let arch = if dest.split('/').any(|segment| segment == "lib") {
        Arch::Arm
    } else {
        Arch::Arm64
    };
    ModuleKind::SharedLib(SharedLibSources::Single {
        arch,
        src: dest.to_string(),
    })
}
