//! # portgrid - Nmap grepable results to a port matrix
//!
//! portgrid reads the line-oriented "grepable" output of an Nmap scan
//! (`nmap -oG`) and turns it into one record per host with open ports,
//! ready to be laid out as a report grid: address, name, OS guess, a flag
//! column per tracked port and a free-text column for everything else.
//!
//! ## Example Usage
//!
//! ```rust
//! use portgrid::{GnmapParser, ReportSchema};
//!
//! let schema = ReportSchema::from_labels(&["IP", "Name", "OS", "SSH (22)", "HTTP (80)", "Other"])
//!     .expect("valid columns");
//! let scan = "Host: 10.0.0.10 ()\tPorts: 22/open/tcp//ssh///\n\
//!             Host: 10.0.0.9 (db.local)\tPorts: 5432/open/tcp//postgresql///\tOS: Linux 4.x\n";
//!
//! let outcome = GnmapParser::new(&schema).parse_str(scan).expect("well-formed scan");
//! assert_eq!(outcome.hosts[0].address().as_str(), "10.0.0.9");
//! assert_eq!(outcome.hosts[0].other_ports_joined(), "5432");
//! assert_eq!(outcome.hosts[1].common_port_flags(), &[true, false]);
//! ```
//!
//! ## Architecture
//!
//! - [`parser`] - Line classification, field extraction and the parse loop
//! - [`host`] - Host records and address ordering
//! - [`schema`] - Report column layout and tracked ports
//! - [`types`] - Address and port newtypes
//! - [`config`] - Settings file handling
//! - [`output`] - CSV, JSON and console renderers
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod output;
pub mod parser;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, InputError, ParseError, SchemaError};
pub use host::{sort_hosts, HostRecord};
pub use parser::{GnmapParser, MalformedLinePolicy, ParseOptions, ParseOutcome};
pub use schema::{ColumnRole, ReportSchema, DEFAULT_COLUMNS};
pub use types::{HostAddress, Port};
