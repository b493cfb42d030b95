//! HufArc CLI - byte-oriented Huffman compression
//!
//! Compresses files into self-describing `.huf` containers and restores them.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{
    CompressOptions, DecompressOptions, cmd_completions, cmd_compress, cmd_decompress, cmd_info,
    cmd_test,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hufarc")]
#[command(author, version, about = "Byte-oriented Huffman compression utility")]
#[command(long_about = "
HufArc compresses files with a per-file Huffman code. Each container stores
its own code table, so any file can be restored without outside information.

Examples:
  hufarc compress notes.txt
  hufarc compress a.bin b.bin c.bin
  hufarc compress notes.txt -o packed.huf
  hufarc decompress notes.txt.huf
  hufarc decompress packed.huf -o notes.txt
  hufarc info notes.txt.huf
  hufarc info notes.txt.huf --json
  hufarc test notes.txt.huf
  hufarc completions bash
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default: <file>.huf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing outputs without asking
        #[arg(short, long)]
        force: bool,

        /// Refuse to compress empty files
        #[arg(long)]
        strict: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,
    },

    /// Decompress .huf files
    #[command(alias = "d", alias = "x")]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default: strips .huf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing outputs without asking
        #[arg(short, long)]
        force: bool,

        /// Fail if a file would decompress to more than this many bytes
        #[arg(long)]
        max_output_size: Option<usize>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,
    },

    /// Show the header and code table of a .huf file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that a .huf file decodes cleanly
    #[command(alias = "t")]
    Test {
        /// File to test
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            force,
            strict,
            verbose,
            progress,
        } => cmd_compress(
            &files,
            &CompressOptions {
                output: output.as_deref(),
                force,
                strict,
                verbose,
                progress,
            },
        ),
        Commands::Decompress {
            files,
            output,
            force,
            max_output_size,
            verbose,
            progress,
        } => cmd_decompress(
            &files,
            &DecompressOptions {
                output: output.as_deref(),
                force,
                max_output_size,
                verbose,
                progress,
            },
        ),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { file, verbose } => cmd_test(&file, verbose),
        Commands::Completions { shell } => cmd_completions(shell, Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
