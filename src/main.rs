//! `huffpack` command-line tool.
//!
//! ```bash
//! huffpack compress notes.txt          # writes notes.txt.huff
//! huffpack decompress notes.txt.huff   # writes notes.txt
//! huffpack inspect notes.txt.huff      # prints tree and code lengths
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use huffpack::{container, file_io, logging, CodecConfig, HuffmanError};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman file compressor", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into <input>.huff
    Compress {
        input: PathBuf,

        /// Output path (defaults to <input>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },

    /// Reconstruct the original file from a .huff file
    Decompress {
        input: PathBuf,

        /// Output path (defaults to the input without .huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },

    /// Describe the contents of a .huff file
    Inspect {
        input: PathBuf,

        /// Also print the full tree
        #[arg(long)]
        tree: bool,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compress {
            input,
            output,
            force,
        } => {
            let config = CodecConfig::default().with_force(force);
            let output = output.unwrap_or_else(|| config.compressed_path(&input));
            let stats = file_io::compress_file(&input, &output, &config)
                .with_context(|| format!("failed to compress {}", input.display()))?;
            println!("{} -> {}: {}", input.display(), output.display(), stats);
        }
        Command::Decompress {
            input,
            output,
            force,
        } => {
            let config = CodecConfig::default().with_force(force);
            let output = output.unwrap_or_else(|| config.decompressed_path(&input));
            let written = file_io::decompress_file(&input, &output, &config)
                .with_context(|| format!("failed to decompress {}", input.display()))?;
            println!("{} -> {}: {} bytes", input.display(), output.display(), written);
        }
        Command::Inspect { input, tree } => {
            let data = file_io::read_whole_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let parsed = container::parse(&data)
                .with_context(|| format!("failed to parse {}", input.display()))?;

            println!("file:            {}", input.display());
            print!("{}", parsed.report(data.len()));
            if tree {
                print!("{}", parsed.tree);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("huffpack: {:#}", err);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let category = err
                .downcast_ref::<HuffmanError>()
                .map_or("unknown", HuffmanError::category);
            error!(category, "{:#}", err);
            ExitCode::FAILURE
        }
    }
}
