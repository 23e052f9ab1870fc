use anyhow::Result;
use chunkwise_cli::commands::Commands;
use clap::Parser;

/// Topic-coherent chunking for timed transcripts
#[derive(Debug, Parser)]
#[command(name = "chunkwise", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}
