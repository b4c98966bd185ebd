//! Error types for portgrid.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// A host line that passed classification but could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed address '{address}'")]
    MalformedAddress { line: usize, address: String },

    #[error("line {line}: host segment has no address")]
    MissingHostSegment { line: usize },

    #[error("line {line}: no open port entries in the Ports segment")]
    MissingPorts { line: usize },
}

impl ParseError {
    /// 1-based input line the error was raised for.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedAddress { line, .. }
            | Self::MissingHostSegment { line }
            | Self::MissingPorts { line } => *line,
        }
    }
}

/// Errors raised while consuming a scan-result stream.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Report column layout errors. Always fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column '{label}' does not encode a port number, expected a label like 'SSH (22)'")]
    Misconfigured { label: String },

    #[error("report needs at least {min} columns, got {got}")]
    TooFewColumns { min: usize, got: usize },

    #[error("{ports} tracked ports configured for {columns} port columns")]
    PortCountMismatch { ports: usize, columns: usize },
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("invalid output format '{0}' in settings")]
    UnknownFormat(String),
}

/// Top-level error for CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output would overwrite the input file: {}", .0.display())]
    OutputIsInput(PathBuf),

    #[error("aborted by user")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for line parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for stream parsing.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
