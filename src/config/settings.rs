//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration.

use crate::error::{ConfigError, ConfigResult, SchemaResult};
use crate::parser::{MalformedLinePolicy, ParseOptions};
use crate::schema::{ReportSchema, DEFAULT_COLUMNS};
use crate::types::Port;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portgrid)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the configuration directory. Nothing is created on disk.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portgrid", "portgrid")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Report column labels. Columns 1-3 are address, name and OS guess,
    /// the last one is "other ports", everything between is a port column.
    pub columns: Vec<String>,
    /// Explicit port numbers for the port columns, in column order.
    /// When unset they are read from the labels, e.g. "SSH (22)".
    pub tracked_ports: Option<Vec<u16>>,
    /// Collapse repeated untracked ports for a host.
    pub dedup_other_ports: bool,
    /// Skip malformed host lines with a warning instead of aborting.
    pub skip_malformed: bool,
    /// Default output format (csv, json, plain).
    pub default_output_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            tracked_ports: None,
            dedup_other_ports: false,
            skip_malformed: false,
            default_output_format: "csv".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!("{}, using default settings", e);
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Build the report schema these settings describe.
    pub fn schema(&self) -> SchemaResult<ReportSchema> {
        match &self.tracked_ports {
            Some(ports) => {
                let ports: Vec<Port> = ports.iter().copied().map(Port::new).collect();
                ReportSchema::with_tracked_ports(self.columns.as_slice(), &ports)
            }
            None => ReportSchema::from_labels(self.columns.as_slice()),
        }
    }

    /// Parser options these settings describe.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            policy: if self.skip_malformed {
                MalformedLinePolicy::Skip
            } else {
                MalformedLinePolicy::Abort
            },
            dedup_other_ports: self.dedup_other_ports,
        }
    }
}
