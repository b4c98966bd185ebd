//! Grepable scan-result parser.
//!
//! Turns the text of an Nmap `-oG` file into sorted [`HostRecord`]s:
//! lines are filtered by [`classify`], split into fields by [`extract`],
//! and built into records against a [`ReportSchema`].

pub mod classify;
pub mod extract;

pub use classify::is_open_host_line;
pub use extract::{extract, ExtractedLine, Segment};

use crate::error::{InputResult, ParseError, ParseResult};
use crate::host::{sort_hosts, HostRecord};
use crate::schema::ReportSchema;
use std::io::BufRead;
use tracing::{debug, info, warn};

/// What to do with a host line that cannot be turned into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedLinePolicy {
    /// Stop at the first bad line.
    #[default]
    Abort,
    /// Log a warning, remember the error and keep going.
    Skip,
}

/// Parser options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub policy: MalformedLinePolicy,
    /// Collapse repeated untracked ports for a host.
    pub dedup_other_ports: bool,
}

impl ParseOptions {
    pub fn skip_malformed(mut self) -> Self {
        self.policy = MalformedLinePolicy::Skip;
        self
    }

    pub fn with_dedup(mut self) -> Self {
        self.dedup_other_ports = true;
        self
    }
}

/// Result of parsing a whole scan file.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Hosts ordered by address.
    pub hosts: Vec<HostRecord>,
    /// Lines dropped under [`MalformedLinePolicy::Skip`].
    pub skipped: Vec<ParseError>,
    /// Total lines read.
    pub lines_read: usize,
}

/// Parser bound to a report schema.
#[derive(Debug, Clone, Copy)]
pub struct GnmapParser<'s> {
    schema: &'s ReportSchema,
    options: ParseOptions,
}

impl<'s> GnmapParser<'s> {
    pub fn new(schema: &'s ReportSchema) -> Self {
        Self {
            schema,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse one line. `Ok(None)` means the line is not an open-port host line.
    pub fn parse_line(&self, line_no: usize, line: &str) -> ParseResult<Option<HostRecord>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if !is_open_host_line(line) {
            return Ok(None);
        }

        let fields = extract(line_no, line)?;
        debug!(
            line = line_no,
            address = %fields.address,
            open = fields.open_ports.len(),
            "host line"
        );

        Ok(Some(HostRecord::build(
            self.schema,
            fields.address,
            fields.name,
            fields.os_guess,
            &fields.open_ports,
            self.options.dedup_other_ports,
        )))
    }

    /// Parse in-memory scan text.
    pub fn parse_str(&self, text: &str) -> ParseResult<ParseOutcome> {
        let mut acc = Accumulator::default();
        for (idx, line) in text.lines().enumerate() {
            self.accept(&mut acc, idx + 1, line)?;
        }
        Ok(acc.finish())
    }

    /// Parse a scan file from any buffered reader in a single pass.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> InputResult<ParseOutcome> {
        let mut acc = Accumulator::default();
        for (idx, line) in reader.lines().enumerate() {
            self.accept(&mut acc, idx + 1, &line?)?;
        }
        Ok(acc.finish())
    }

    fn accept(&self, acc: &mut Accumulator, line_no: usize, line: &str) -> ParseResult<()> {
        acc.lines_read = line_no;
        match self.parse_line(line_no, line) {
            Ok(Some(host)) => acc.hosts.push(host),
            Ok(None) => {}
            Err(e) => match self.options.policy {
                MalformedLinePolicy::Abort => return Err(e),
                MalformedLinePolicy::Skip => {
                    warn!("skipping {}", e);
                    acc.skipped.push(e);
                }
            },
        }
        Ok(())
    }
}

#[derive(Default)]
struct Accumulator {
    hosts: Vec<HostRecord>,
    skipped: Vec<ParseError>,
    lines_read: usize,
}

impl Accumulator {
    fn finish(self) -> ParseOutcome {
        info!(
            lines = self.lines_read,
            hosts = self.hosts.len(),
            skipped = self.skipped.len(),
            "parsed scan results"
        );
        ParseOutcome {
            hosts: sort_hosts(&self.hosts),
            skipped: self.skipped,
            lines_read: self.lines_read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::schema::DEFAULT_COLUMNS;
    use crate::types::Port;
    use std::io::Cursor;

    const SCAN: &str = "\
# Nmap 6.40 scan initiated Sat Oct 10 12:00:00 2015 as: nmap -O -oG scan.gnmap 10.0.0.0/24
Host: 10.0.0.10 (ten.example.com)\tStatus: Up
Host: 10.0.0.10 (ten.example.com)\tPorts: 22/open/tcp//ssh///, 80/open/tcp//http///, 3306/open/tcp//mysql///\tIgnored State: closed (997)\tOS: Linux 3.2 - 4.0
Host: 10.0.0.9 ()\tStatus: Up
Host: 10.0.0.9 ()\tPorts: 443/open/tcp//https///, 8443/open/tcp//https-alt///
Host: 10.0.0.2 ()\tStatus: Up
Host: 10.0.0.2 ()\tPorts: 80/closed/tcp//http///
# Nmap done at Sat Oct 10 12:01:00 2015 -- 256 IP addresses (3 hosts up) scanned in 60.00 seconds
";

    fn schema() -> ReportSchema {
        ReportSchema::from_labels(DEFAULT_COLUMNS).unwrap()
    }

    fn two_port_schema() -> ReportSchema {
        ReportSchema::from_labels(&["IP", "Name", "OS", "SSH (22)", "HTTP (80)", "Other"]).unwrap()
    }

    #[test]
    fn test_parse_scan() {
        let schema = schema();
        let outcome = GnmapParser::new(&schema).parse_str(SCAN).unwrap();

        assert_eq!(outcome.lines_read, 8);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.hosts.len(), 2);

        let first = &outcome.hosts[0];
        assert_eq!(first.address().as_str(), "10.0.0.9");
        assert_eq!(first.name(), "");
        assert_eq!(first.os_guess(), "");
        assert_eq!(first.other_ports(), &[Port::new(8443)]);

        let second = &outcome.hosts[1];
        assert_eq!(second.address().as_str(), "10.0.0.10");
        assert_eq!(second.name(), "ten.example.com");
        assert_eq!(second.os_guess(), "Linux 3.2 - 4.0");
        assert_eq!(
            second.common_port_flags(),
            &[false, true, false, false, false, true, false]
        );
        assert_eq!(second.other_ports_joined(), "3306");
    }

    #[test]
    fn test_reference_line() {
        let schema = two_port_schema();
        let line = "Host: 192.168.1.5 (web.local)\tPorts: 22/open/tcp//ssh///,8080/open/tcp//http-alt///\tOS: Linux 4.x";
        let host = GnmapParser::new(&schema).parse_line(1, line).unwrap().unwrap();

        assert_eq!(host.address().as_str(), "192.168.1.5");
        assert_eq!(host.name(), "web.local");
        assert_eq!(host.os_guess(), "Linux 4.x");
        assert_eq!(host.common_port_flags(), &[true, false]);
        assert_eq!(host.other_ports(), &[Port::new(8080)]);
    }

    #[test]
    fn test_closed_only_line_is_skipped() {
        let schema = two_port_schema();
        let parser = GnmapParser::new(&schema);
        assert_eq!(
            parser
                .parse_line(1, "Host: 10.0.0.1 ()\tPorts: 80/closed/tcp//http///")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_open_token_in_os_text_does_not_abort() {
        let schema = two_port_schema();
        let text = "Host: 10.0.0.1 ()\tPorts: 22/open/tcp//ssh///\n\
                    Host: 10.0.0.2 ()\tPorts: 80/closed/tcp//http///\tOS: build 7/open/beta\n";
        let outcome = GnmapParser::new(&schema).parse_str(text).unwrap();
        assert_eq!(outcome.hosts.len(), 1);
        assert_eq!(outcome.hosts[0].address().as_str(), "10.0.0.1");
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let schema = two_port_schema();
        let text = "Host: 10.0.0.1 ()\tPorts: 22/open/tcp//ssh///\tOS: Linux\r\n";
        let outcome = GnmapParser::new(&schema).parse_str(text).unwrap();
        assert_eq!(outcome.hosts[0].os_guess(), "Linux");
    }

    #[test]
    fn test_abort_policy_stops_on_bad_line() {
        let schema = two_port_schema();
        let text = "Host: 10.0.0.1 ()\tPorts: 22/open/tcp//ssh///\n\
                    Host: 10.0.0 ()\tPorts: 22/open/tcp//ssh///\n";
        let err = GnmapParser::new(&schema).parse_str(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedAddress {
                line: 2,
                address: "10.0.0".to_string()
            }
        );
    }

    #[test]
    fn test_skip_policy_collects_errors() {
        let schema = two_port_schema();
        let text = "Host: 10.0.0.1 ()\tPorts: 22/open/tcp//ssh///\n\
                    Host: bogus ()\tPorts: 22/open/tcp//ssh///\n\
                    Host: 10.0.0.3 ()\tPorts: 80/open/tcp//http///\n";
        let parser = GnmapParser::new(&schema)
            .with_options(ParseOptions::default().skip_malformed());
        let outcome = parser.parse_str(text).unwrap();

        assert_eq!(outcome.hosts.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line(), 2);
    }

    #[test]
    fn test_dedup_option() {
        let schema = two_port_schema();
        let line = "Host: 10.0.0.1 ()\tPorts: 9000/open/tcp////, 9000/open/tcp////, 22/open/tcp////";
        let parser = GnmapParser::new(&schema)
            .with_options(ParseOptions::default().with_dedup());
        let host = parser.parse_line(1, line).unwrap().unwrap();
        assert_eq!(host.other_ports(), &[Port::new(9000)]);
    }

    #[test]
    fn test_parse_reader_matches_parse_str() {
        let schema = schema();
        let parser = GnmapParser::new(&schema);
        let from_reader = parser.parse_reader(Cursor::new(SCAN)).unwrap();
        let from_str = parser.parse_str(SCAN).unwrap();
        assert_eq!(from_reader.hosts, from_str.hosts);
        assert_eq!(from_reader.lines_read, from_str.lines_read);
    }

    #[test]
    fn test_parse_reader_surfaces_parse_errors() {
        let schema = schema();
        let text = "Host: 300.1.1.1 ()\tPorts: 22/open/tcp////\n";
        let err = GnmapParser::new(&schema)
            .parse_reader(Cursor::new(text))
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::Parse(ParseError::MalformedAddress { line: 1, .. })
        ));
    }

    #[test]
    fn test_every_record_has_one_flag_per_tracked_port() {
        let schema = schema();
        let outcome = GnmapParser::new(&schema).parse_str(SCAN).unwrap();
        for host in &outcome.hosts {
            assert_eq!(host.common_port_flags().len(), schema.tracked_ports().len());
            let tracked: Vec<Port> = host.open_tracked_ports(&schema).collect();
            assert!(host.other_ports().iter().all(|p| !tracked.contains(p)));
        }
    }
}
