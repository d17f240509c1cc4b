//! rafio CLI - streaming reader for afio archives.
//!
//! Reads the legacy afio/cpio ASCII-header format (magic `070707`) as a
//! forward-only stream: archives are never loaded or indexed in memory.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::extract::ExtractOptions;
use commands::list::ListOptions;
use commands::{cmd_extract, cmd_info, cmd_list, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rafio")]
#[command(
    author,
    version,
    about = "Streaming reader for legacy afio/cpio ASCII archives"
)]
#[command(long_about = "
rafio reads legacy afio/cpio archives with the ASCII 070707 header in a
single forward pass, so it works on pipes and other non-seekable sources.

Examples:
  rafio list work.afz
  rafio list --offsets work.afz
  rafio list --json work.afz
  rafio extract work.afz -o restored/
  rafio extract work.afz etc/fstab
  rafio info work.afz
  rafio test work.afz
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contents of an archive
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Show verbose output (mode, owner, mtime columns)
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Show stream offset accounting per entry
        #[arg(short = 'O', long)]
        offsets: bool,

        /// Include only entries matching pattern (glob syntax: *.txt, src/**/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude entries matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,
    },

    /// Extract files from an archive
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Entries to extract (all if empty)
        files: Vec<String>,

        /// Include only entries matching pattern (glob syntax: *.txt, src/**/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude entries matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,
    },

    /// Show information about an archive
    #[command(alias = "i")]
    Info {
        /// Archive file to inspect
        archive: PathBuf,
    },

    /// Walk an archive and report corruption
    #[command(alias = "t")]
    Test {
        /// Archive file to test
        archive: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            archive,
            verbose,
            json,
            offsets,
            include,
            exclude,
        } => cmd_list(
            &archive,
            &ListOptions {
                verbose,
                json,
                offsets,
                include: &include,
                exclude: &exclude,
            },
        ),
        Commands::Extract {
            archive,
            output,
            files,
            include,
            exclude,
            verbose,
            progress,
        } => cmd_extract(
            &archive,
            &ExtractOptions {
                output: &output,
                files: &files,
                include: &include,
                exclude: &exclude,
                verbose,
                progress,
            },
        ),
        Commands::Info { archive } => cmd_info(&archive),
        Commands::Test { archive, verbose } => cmd_test(&archive, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
