use clap::{Parser, Subcommand};
use fundboard::resolver::MalformedPolicy;
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "fundboard")]
#[command(
    version,
    about = "Fund dashboard data: trade history, ranked holdings and allocation"
)]
#[command(
    long_about = "Resolve the fund dashboard datasets (trade history, investment reports and recommendations) from the data directory, falling back to sample data for any file that is missing."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Directory containing trade_history.xlsx and the CSV sources
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/fundboard/config.toml)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// What to do with an unreadable reports or recommendations file (fail, synthesize)
    #[arg(long = "on-malformed", global = true, value_parser = parse_policy)]
    pub on_malformed: Option<MalformedPolicy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Overview: sources, performance range, top holdings and allocation
    Summary,

    /// Show where each dataset came from
    Sources,

    /// Show daily portfolio values
    History {
        /// Number of most recent days to show
        #[arg(short, long, default_value_t = 10)]
        tail: usize,

        /// Show every record
        #[arg(short, long)]
        all: bool,
    },

    /// Show holdings ranked by investment score
    Holdings {
        /// Number of holdings to show
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },

    /// Show recommended portfolio weights
    Allocation,

    /// Show the investment report for one symbol
    Report {
        /// Ticker symbol (e.g., NVDA)
        symbol: String,
    },
}

fn parse_policy(value: &str) -> Result<MalformedPolicy, String> {
    value
        .parse()
        .map_err(|_| format!("invalid policy '{}': expected 'fail' or 'synthesize'", value))
}
