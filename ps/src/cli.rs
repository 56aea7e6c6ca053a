//! CLI argument parsing for pisearch

use clap::{Parser, Subcommand, ValueEnum};
use digitstore::Encoding;
use std::path::PathBuf;

use crate::config::Config;
use crate::search::StrategyKind;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Find digit patterns in the digits of pi", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Digit file (overrides digits.path)
    #[arg(short, long, global = true)]
    pub digits: Option<PathBuf>,

    /// Digit file layout: unpacked or packed (overrides digits.encoding)
    #[arg(short, long, global = true)]
    pub encoding: Option<Encoding>,

    /// Search strategy: chunked or direct (overrides search.strategy)
    #[arg(long, global = true)]
    pub strategy: Option<StrategyKind>,

    /// Digits decoded per chunk (overrides search.window_size)
    #[arg(short, long, global = true)]
    pub window_size: Option<usize>,

    /// Context digits around a match (overrides search.context_radius)
    #[arg(short, long, global = true)]
    pub radius: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
        if let Some(path) = &self.digits {
            config.digits.path = path.clone();
        }
        if let Some(encoding) = self.encoding {
            config.digits.encoding = encoding;
        }
        if let Some(strategy) = self.strategy {
            config.search.strategy = strategy;
        }
        if let Some(window_size) = self.window_size {
            config.search.window_size = window_size;
        }
        if let Some(radius) = self.radius {
            config.search.context_radius = radius;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the first occurrence of a digit pattern
    Search {
        /// Digits to search for
        #[arg(required = true)]
        pattern: String,

        /// Position to start searching from
        #[arg(short, long, default_value = "0")]
        start: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a range of digits
    Digits {
        /// First position to print
        #[arg(required = true)]
        start: u64,

        /// Number of digits (clamped at the end of the file)
        #[arg(required = true)]
        count: u64,
    },

    /// Show the digit file layout and size
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for search and stats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
