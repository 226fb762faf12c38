// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "blobforge")]
#[command(author, version, about = "Manifest-driven vendor tree generator for proprietary device blobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate vendor tree descriptor files from a blob manifest
    Generate {
        /// Path to the blob manifest
        manifest: PathBuf,
        /// Source tree root to create vendor/<vendor>/<device> under
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Vendor name
        #[arg(long)]
        vendor: String,
        /// Device codename
        #[arg(long)]
        device: String,
    },
    /// Print one classified category of a manifest
    Classify {
        /// Path to the blob manifest
        manifest: PathBuf,
        /// Category to print
        #[arg(short, long, default_value = "copy", value_parser = ["copy", "packaged"])]
        mode: String,
    },
    /// Move a misplaced XML declaration to the top of a file
    FixXml {
        /// XML file to fix in place
        file: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            manifest,
            root,
            vendor,
            device,
        }) => commands::generate(&manifest, &root, &vendor, &device),
        Some(Commands::Classify { manifest, mode }) => {
            commands::classify_manifest(&manifest, &mode)
        }
        Some(Commands::FixXml { file }) => commands::fix_xml(&file),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("blobforge v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'blobforge --help' for usage information");
            Ok(())
        }
    }
}
