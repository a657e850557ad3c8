//! tickbar CLI - Live one-minute OHLCV bars from trade ticks.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbar_lib::{ClosePolicy, SeedMode, SessionConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbar")]
#[command(about = "Fold trade ticks into live one-minute OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no table or progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay raw events as a live feed and repaint the trailing bars
    Stream(StreamArgs),

    /// Aggregate raw events into bars and write them to a file
    Aggregate(AggregateArgs),
}

/// Inputs shared by every command.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Newline-delimited raw events, or '-' for stdin
    #[arg(short, long)]
    pub(crate) events: PathBuf,

    /// Price-history JSON document used to seed the series
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,

    /// Only seed candles from the last N minutes
    #[arg(long)]
    pub(crate) lookback_minutes: Option<u32>,

    /// Only aggregate events for this symbol
    #[arg(short, long)]
    pub(crate) symbol: Option<String>,

    /// How out-of-order ticks set open and close (arrival, sequence)
    #[arg(long, default_value = "arrival")]
    pub(crate) close_policy: ClosePolicy,

    /// Fail if the price history has no candles
    #[arg(long)]
    pub(crate) require_history: bool,
}

impl InputArgs {
    /// Session settings implied by these inputs.
    pub(crate) fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new()
            .with_close_policy(self.close_policy)
            .with_history(if self.require_history {
                SeedMode::RequireNonEmpty
            } else {
                SeedMode::AllowEmpty
            });
        if let Some(symbol) = &self.symbol {
            config = config.with_symbol(symbol.as_str());
        }
        config
    }
}

#[derive(Args)]
pub(crate) struct StreamArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Number of most recent bars to show
    #[arg(short, long, default_value = "60")]
    pub(crate) window: usize,

    /// Milliseconds between repaints (at least 50)
    #[arg(long, default_value = "1000")]
    pub(crate) interval_ms: u64,

    /// Delay in milliseconds before each replayed event
    #[arg(long)]
    pub(crate) throttle_ms: Option<u64>,

    /// Write the final series to this file
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub(crate) format: Format,
}

#[derive(Args)]
pub(crate) struct AggregateArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Output file path
    #[arg(short, long)]
    pub(crate) output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub(crate) format: Format,
}

/// Routes logs to stderr so stdout stays free for the bar table.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Stream(args) => commands::stream::stream(&args, cli.quiet).await,
        Commands::Aggregate(args) => commands::aggregate::aggregate(&args, cli.quiet).await,
    }
}
