//! Scan export CLI: turn fragment snapshots into a single OBJ file.
//!
//! # Commands
//!
//! - `mesh-export export --input scan.json` - Merge and write `scan.obj`
//! - `mesh-export inspect --input scan.json` - Validate without writing
//!
//! Set `RUST_LOG=debug` to see per-fragment progress.

mod commands;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::ExportOptions;

#[derive(Parser)]
#[command(name = "mesh-export")]
#[command(version, about = "Merge scanned mesh fragments into a Wavefront OBJ file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a fragment snapshot as OBJ
    Export {
        /// JSON array of fragments
        #[arg(short, long)]
        input: PathBuf,

        /// Destination file
        #[arg(short, long, conflicts_with = "dir")]
        output: Option<PathBuf>,

        /// Write `scan.obj` into this directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Terminate records with CRLF
        #[arg(long)]
        crlf: bool,

        /// Emit NaN/infinite coordinates instead of rejecting the fragment
        #[arg(long)]
        allow_non_finite: bool,

        /// Skip fsync before the atomic rename
        #[arg(long)]
        no_sync: bool,
    },

    /// Validate a fragment snapshot and print a summary
    Inspect {
        /// JSON array of fragments
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            dir,
            crlf,
            allow_non_finite,
            no_sync,
        } => commands::export(&ExportOptions {
            input,
            output,
            dir,
            crlf,
            allow_non_finite,
            no_sync,
        }),
        Commands::Inspect { input } => commands::inspect(&input),
    }
}
