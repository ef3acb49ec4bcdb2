mod logger;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;

use huffpack::CodecReport;

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Huffman compression for text files.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log table and padding details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print the result as a JSON line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file
    Encode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Restore a file written by `encode`
    Decode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn print_report(report: &CodecReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    logger::init(level)?;

    let report = match &cli.command {
        Commands::Encode { input, output } => huffpack::encode_file(input, output)
            .with_context(|| format!("failed to encode {}", input.display()))?,
        Commands::Decode { input, output } => huffpack::decode_file(input, output)
            .with_context(|| format!("failed to decode {}", input.display()))?,
    };

    print_report(&report, cli.json)
}
