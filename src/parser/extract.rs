//! Field extraction for a single grepable host line.
//!
//! A line is a run of tab-separated segments, each starting with a field
//! name and `": "`. Only the `Host`, `Ports` and `OS` segments carry data
//! for the report; anything else is skipped so newer scanner fields do not
//! break parsing.

use crate::error::{ParseError, ParseResult};
use crate::types::{HostAddress, Port};
use tracing::warn;

/// Prefix every host line of a grepable scan starts with.
pub(crate) const HOST_FIELD: &str = "Host: ";
const PORTS_FIELD: &str = "Ports: ";
const OS_FIELD: &str = "OS: ";

/// A classified segment of a host line. Payloads exclude the field prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Host(&'a str),
    Ports(&'a str),
    Os(&'a str),
    Unknown(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify one tab-separated segment by its field prefix.
    pub fn classify(raw: &'a str) -> Self {
        if let Some(body) = raw.strip_prefix(HOST_FIELD) {
            Self::Host(body)
        } else if let Some(body) = raw.strip_prefix(PORTS_FIELD) {
            Self::Ports(body)
        } else if let Some(body) = raw.strip_prefix(OS_FIELD) {
            Self::Os(body)
        } else {
            Self::Unknown(raw)
        }
    }
}

/// Split a line into classified segments.
pub fn segments(line: &str) -> impl Iterator<Item = Segment<'_>> {
    line.split('\t').map(Segment::classify)
}

/// Raw values pulled out of one host line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLine {
    pub address: HostAddress,
    pub name: String,
    pub open_ports: Vec<Port>,
    pub os_guess: Option<String>,
}

/// Extract host, port and OS values from an accepted host line.
///
/// `line_no` is only used to label errors.
pub fn extract(line_no: usize, line: &str) -> ParseResult<ExtractedLine> {
    let mut host: Option<(&str, &str)> = None;
    let mut open_ports = Vec::new();
    let mut os_guess = None;

    for segment in segments(line) {
        match segment {
            Segment::Host(body) => {
                if host.is_none() {
                    host = host_fields(body);
                }
            }
            Segment::Ports(body) => open_ports.extend(open_ports_in(line_no, body)),
            Segment::Os(body) => os_guess = Some(body.to_string()),
            Segment::Unknown(_) => {}
        }
    }

    let (address, name) = host.ok_or(ParseError::MissingHostSegment { line: line_no })?;
    let address: HostAddress = address.parse().map_err(|_| ParseError::MalformedAddress {
        line: line_no,
        address: address.to_string(),
    })?;

    if open_ports.is_empty() {
        return Err(ParseError::MissingPorts { line: line_no });
    }

    Ok(ExtractedLine {
        address,
        name: name.to_string(),
        open_ports,
        os_guess,
    })
}

/// Address and bare name from a Host segment body like `10.0.0.1 (a.local)`.
/// A missing or `()` name yields an empty string.
fn host_fields(body: &str) -> Option<(&str, &str)> {
    let mut tokens = body.split_whitespace();
    let address = tokens.next()?;
    let name = tokens
        .next()
        .map(|t| t.trim_matches(|c| c == '(' || c == ')'))
        .unwrap_or("");
    Some((address, name))
}

/// Open port numbers from a Ports segment body, in order, duplicates kept.
///
/// Entries look like `22/open/tcp//ssh//OpenSSH 6.6.1p1/` and are separated
/// by commas. Pieces that are not port entries (a comma inside a version
/// string, for instance) are ignored.
pub fn open_ports_in(line_no: usize, body: &str) -> Vec<Port> {
    let mut ports = Vec::new();
    for entry in body.split(',') {
        let mut fields = entry.trim_start().split('/');
        let (Some(number), Some("open")) = (fields.next(), fields.next()) else {
            continue;
        };
        match number.parse::<Port>() {
            Ok(port) => ports.push(port),
            Err(e) => warn!(line = line_no, "ignoring open port entry: {}", e),
        }
    }
    ports
}
