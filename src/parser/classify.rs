//! Cheap line filter run before any field extraction.

use super::extract::{segments, Segment, HOST_FIELD};

const OPEN_MARKER: &str = "/open/";

/// True for host lines whose Ports segment reports at least one open port.
///
/// Comments, status-only lines and hosts without open ports are all
/// rejected here and never reach the extractor. An `N/open/` run in any
/// other segment (OS text, for instance) does not count.
pub fn is_open_host_line(line: &str) -> bool {
    line.starts_with(HOST_FIELD)
        && segments(line).any(|segment| match segment {
            Segment::Ports(body) => has_open_port_token(body),
            _ => false,
        })
}

/// Looks for a `<digits>/open/` token anywhere in `text`.
///
/// `open|filtered` does not count.
pub fn has_open_port_token(text: &str) -> bool {
    text.match_indices(OPEN_MARKER)
        .any(|(at, _)| text[..at].bytes().last().is_some_and(|b| b.is_ascii_digit()))
}
