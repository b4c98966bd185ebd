//! Plain text output formatting.
//!
//! Produces a human-readable table with colors and formatting.

use super::{grid_row, REPORT_TITLE};
use crate::host::HostRecord;
use crate::schema::{ColumnRole, ReportSchema};
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Print the report as a console table.
pub fn write_plain<W: Write>(mut out: W, schema: &ReportSchema, hosts: &[HostRecord]) -> io::Result<()> {
    let headers: Vec<String> = schema.columns().iter().map(|c| short_header(c.role)).collect();
    let rows: Vec<Vec<String>> = hosts.iter().map(|h| grid_row(schema, h)).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out, "                    {}", style(REPORT_TITLE).cyan().bold())?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    if rows.is_empty() {
        writeln!(out, "  {}", style("No hosts with open ports.").dim())?;
    } else {
        let header_line = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "  {}", style(header_line.trim_end()).bold())?;

        for row in &rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(out, "  {}", line.trim_end())?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} hosts, {} tracked ports",
        style("Summary:").bold(),
        style(hosts.len()).green().bold(),
        schema.tracked_ports().len()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;

    Ok(())
}

/// Compact header for the console table; port columns show just the number.
fn short_header(role: ColumnRole) -> String {
    match role {
        ColumnRole::Address => "ADDRESS".to_string(),
        ColumnRole::Name => "NAME".to_string(),
        ColumnRole::OsGuess => "OS GUESS".to_string(),
        ColumnRole::Port(port) => port.to_string(),
        ColumnRole::Other => "OTHER".to_string(),
    }
}

/// Print the column layout of a schema.
pub fn print_schema(schema: &ReportSchema) {
    println!();
    println!("{}", style("Report columns").cyan().bold());
    for (i, column) in schema.columns().iter().enumerate() {
        println!(
            "  {:>2}  {:<28}  {}",
            i + 1,
            column.label.replace('\n', " "),
            style(column.role).dim()
        );
    }
    let ports: Vec<String> = schema.tracked_ports().iter().map(|p| p.to_string()).collect();
    println!();
    println!("{} {}", style("Tracked ports:").bold(), ports.join(", "));
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), msg);
}
