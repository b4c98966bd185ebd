//! JSON output formatting.

use super::REPORT_TITLE;
use crate::host::HostRecord;
use crate::schema::{Column, ReportSchema};
use crate::types::Port;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

/// Serialized shape of a JSON report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub title: &'static str,
    pub generated_at: DateTime<Utc>,
    pub columns: &'a [Column],
    pub tracked_ports: &'a [Port],
    pub hosts: &'a [HostRecord],
}

impl<'a> JsonReport<'a> {
    pub fn new(schema: &'a ReportSchema, hosts: &'a [HostRecord]) -> Self {
        Self {
            title: REPORT_TITLE,
            generated_at: Utc::now(),
            columns: schema.columns(),
            tracked_ports: schema.tracked_ports(),
            hosts,
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(mut out: W, schema: &ReportSchema, hosts: &[HostRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, &JsonReport::new(schema, hosts)).map_err(io::Error::from)?;
    writeln!(out)
}
