// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: manifest path
fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .required(true)
        .help("Path to the blob manifest")
}

fn build_cli() -> Command {
    Command::new("blobforge")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Blobforge Contributors")
        .about("Manifest-driven vendor tree generator for proprietary device blobs")
        .subcommand_required(false)
        .subcommand(
            Command::new("generate")
                .about("Generate vendor tree descriptor files from a blob manifest")
                .arg(manifest_arg())
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .default_value(".")
                        .help("Source tree root to create vendor/<vendor>/<device> under"),
                )
                .arg(Arg::new("vendor").long("vendor").required(true).help("Vendor name"))
                .arg(Arg::new("device").long("device").required(true).help("Device codename")),
        )
        .subcommand(
            Command::new("classify")
                .about("Print one classified category of a manifest")
                .arg(manifest_arg())
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .default_value("copy")
                        .value_parser(["copy", "packaged"])
                        .help("Category to print"),
                ),
        )
        .subcommand(
            Command::new("fix-xml")
                .about("Move a misplaced XML declaration to the top of a file")
                .arg(Arg::new("file").required(true).help("XML file to fix in place")),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("blobforge.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
