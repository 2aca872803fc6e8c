//! jetperf CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod fill;

#[derive(Parser)]
#[command(name = "jetperf")]
#[command(about = "jetperf - flavor- and pT-binned b-tagging histograms")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill histograms from a JSON-lines file of jet records
    Fill {
        /// Input jets (one JSON record per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output histogram tree (pretty JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Binning config (YAML or JSON). Defaults to the built-in binning.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Skip records with an unknown truth label instead of failing
        #[arg(long)]
        skip_unknown: bool,
    },

    /// Print the default binning config as YAML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Fill { input, output, config, threads, skip_unknown } => {
            fill::cmd_fill(&input, &output, config.as_deref(), threads, skip_unknown)
        }
        Commands::DefaultConfig => {
            print!("{}", jp_hist::BinningConfig::default().to_yaml()?);
            Ok(())
        }
    }
}
