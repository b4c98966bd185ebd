//! Report column layout.
//!
//! A report has three leading structural columns (address, name, OS guess),
//! one trailing "other ports" column, and a run of port columns in between.
//! Each port column's label carries its port number as a trailing
//! parenthesized integer, e.g. `"SSH (22)"`.

use crate::error::{SchemaError, SchemaResult};
use crate::types::Port;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Column labels used when no settings file overrides them.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "IP Address",
    "Fully-qualified\nDomain Name",
    "Operating System Guess",
    "FTP (21)",
    "SSH (22)",
    "Telnet (23)",
    "SMTP (25)",
    "Domain (53)",
    "HTTP (80)",
    "HTTPS (443)",
    "Other",
];

/// Number of structural columns before the port columns.
const LEADING_COLUMNS: usize = 3;

/// What a report column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "role", content = "port")]
pub enum ColumnRole {
    Address,
    Name,
    OsGuess,
    /// Flag column for one tracked port.
    Port(Port),
    /// Free-text list of untracked open ports.
    Other,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Name => write!(f, "name"),
            Self::OsGuess => write!(f, "os guess"),
            Self::Port(port) => write!(f, "port {}", port),
            Self::Other => write!(f, "other ports"),
        }
    }
}

/// A single report column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub label: String,
    #[serde(flatten)]
    pub role: ColumnRole,
}

/// Immutable column layout shared by the record builder and the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSchema {
    columns: Vec<Column>,
    tracked_ports: Vec<Port>,
}

impl ReportSchema {
    /// Smallest layout: the three structural columns plus "other".
    pub const MIN_COLUMNS: usize = LEADING_COLUMNS + 1;

    /// Build a schema, deriving tracked ports from the port column labels.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> SchemaResult<Self> {
        let ports = derive_tracked_ports(labels)?;
        Self::assemble(labels, ports)
    }

    /// Build a schema with an explicit tracked-port list instead of the
    /// numbers embedded in the labels. The list must line up one-to-one
    /// with the port columns.
    pub fn with_tracked_ports<S: AsRef<str>>(labels: &[S], ports: &[Port]) -> SchemaResult<Self> {
        check_column_count(labels)?;
        let columns = labels.len() - Self::MIN_COLUMNS;
        if ports.len() != columns {
            return Err(SchemaError::PortCountMismatch {
                ports: ports.len(),
                columns,
            });
        }
        Self::assemble(labels, ports.to_vec())
    }

    fn assemble<S: AsRef<str>>(labels: &[S], tracked_ports: Vec<Port>) -> SchemaResult<Self> {
        let last = labels.len() - 1;
        let columns = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let role = match i {
                    0 => ColumnRole::Address,
                    1 => ColumnRole::Name,
                    2 => ColumnRole::OsGuess,
                    i if i == last => ColumnRole::Other,
                    i => ColumnRole::Port(tracked_ports[i - LEADING_COLUMNS]),
                };
                Column {
                    label: label.as_ref().to_string(),
                    role,
                }
            })
            .collect();

        let mut seen = HashSet::new();
        for port in &tracked_ports {
            if !seen.insert(*port) {
                warn!(port = port.as_u16(), "port is tracked by more than one column");
            }
        }

        Ok(Self {
            columns,
            tracked_ports,
        })
    }

    /// All columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Tracked ports in column order.
    pub fn tracked_ports(&self) -> &[Port] {
        &self.tracked_ports
    }

    pub fn is_tracked(&self, port: Port) -> bool {
        self.tracked_ports.contains(&port)
    }
}

fn check_column_count<S: AsRef<str>>(labels: &[S]) -> SchemaResult<()> {
    if labels.len() < ReportSchema::MIN_COLUMNS {
        return Err(SchemaError::TooFewColumns {
            min: ReportSchema::MIN_COLUMNS,
            got: labels.len(),
        });
    }
    Ok(())
}

/// Extract the port list from the port column labels.
///
/// Pure: the same labels always give the same ports, in label order,
/// duplicates included.
pub fn derive_tracked_ports<S: AsRef<str>>(labels: &[S]) -> SchemaResult<Vec<Port>> {
    check_column_count(labels)?;
    labels[LEADING_COLUMNS..labels.len() - 1]
        .iter()
        .map(|label| {
            let label = label.as_ref();
            port_from_label(label).ok_or_else(|| SchemaError::Misconfigured {
                label: label.to_string(),
            })
        })
        .collect()
}

/// Read the trailing `(<digits>)` of a label, e.g. `"HTTPS (443)"` -> 443.
/// Requires some text before the parenthesis.
pub fn port_from_label(label: &str) -> Option<Port> {
    let inner = label.trim_end().strip_suffix(')')?;
    let open = inner.rfind('(')?;
    if inner[..open].trim().is_empty() {
        return None;
    }
    inner[open + 1..].parse().ok()
}
