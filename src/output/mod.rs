//! Report rendering.
//!
//! Lays parsed hosts out on the schema's column grid and writes them as
//! CSV, JSON or a plain console table.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::{write_json, JsonReport};
pub use plain::{
    print_error, print_info, print_schema, print_success, print_warning, write_plain,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::host::HostRecord;
use crate::schema::{ColumnRole, ReportSchema};
use std::io::Write;

/// Title shown above every report.
pub const REPORT_TITLE: &str = "Target Matrix";

/// Cell text for an open tracked port.
pub const OPEN_MARK: &str = "X";

/// Write hosts in the requested format.
pub fn write_report<W: Write>(
    out: W,
    schema: &ReportSchema,
    hosts: &[HostRecord],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Csv => write_csv(out, schema, hosts)?,
        OutputFormat::Json => write_json(out, schema, hosts)?,
        OutputFormat::Plain => write_plain(out, schema, hosts)?,
    }
    Ok(())
}

/// One report row: a cell per schema column, in column order.
///
/// Port columns consume the host's flags in order, so a schema that tracks
/// the same port twice still lines up.
pub fn grid_row(schema: &ReportSchema, host: &HostRecord) -> Vec<String> {
    let mut flags = host.common_port_flags().iter().copied();
    schema
        .columns()
        .iter()
        .map(|column| match column.role {
            ColumnRole::Address => host.address().to_string(),
            ColumnRole::Name => host.name().to_string(),
            ColumnRole::OsGuess => host.os_guess().to_string(),
            ColumnRole::Port(_) => {
                if flags.next().unwrap_or(false) {
                    OPEN_MARK.to_string()
                } else {
                    String::new()
                }
            }
            ColumnRole::Other => host.other_ports_joined(),
        })
        .collect()
}
