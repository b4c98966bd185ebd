//! CLI definitions and handlers.
//!
//! Implements a small subcommand architecture:
//! - `portgrid convert <scan.gnmap>` - Build a report from a grepable scan
//! - `portgrid schema` - Show the configured report columns
//!
//! `portgrid <scan.gnmap>` without a subcommand behaves like `convert`.

mod convert;
mod prompt;
mod schema;

pub use convert::ConvertCommand;
pub use prompt::confirm;
pub use schema::SchemaCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// portgrid - Nmap grepable results to a per-host port matrix.
///
/// Reads an Nmap `-oG` file, keeps every host with at least one open port,
/// and writes one row per host with a column for each tracked port.
#[derive(Parser, Debug)]
#[command(name = "portgrid")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn Nmap grepable output into a port matrix report", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH", env = "PORTGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Scan file to convert (shorthand for 'portgrid convert <INPUT>')
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a grepable scan file into a report
    #[command(alias = "c")]
    Convert(ConvertCommand),

    /// Show the report column layout
    Schema(SchemaCommand),
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Spreadsheet-ready CSV grid
    Csv,
    /// JSON structured output
    Json,
    /// Human-readable table on stdout
    Plain,
}

impl OutputFormat {
    /// File extension for reports written to disk.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("csv"),
            Self::Json => Some("json"),
            Self::Plain => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}
