//! Normalized per-host records and their ordering.

use crate::schema::ReportSchema;
use crate::types::{HostAddress, Port};
use serde::Serialize;

/// One scanned host with at least one open port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    address: HostAddress,
    name: String,
    os_guess: String,
    common_port_flags: Vec<bool>,
    other_ports: Vec<Port>,
}

impl HostRecord {
    /// Build a record against `schema`.
    ///
    /// Tracked ports become flags in schema order; every other open port
    /// lands in `other_ports` in the order it was seen. With `dedup` set,
    /// repeated untracked ports are kept only once.
    pub fn build(
        schema: &ReportSchema,
        address: HostAddress,
        name: impl Into<String>,
        os_guess: Option<String>,
        open_ports: &[Port],
        dedup: bool,
    ) -> Self {
        let common_port_flags = schema
            .tracked_ports()
            .iter()
            .map(|tracked| open_ports.contains(tracked))
            .collect();

        let mut other_ports: Vec<Port> = Vec::new();
        for port in open_ports.iter().copied() {
            if schema.is_tracked(port) || (dedup && other_ports.contains(&port)) {
                continue;
            }
            other_ports.push(port);
        }

        Self {
            address,
            name: name.into(),
            os_guess: os_guess.unwrap_or_default(),
            common_port_flags,
            other_ports,
        }
    }

    pub fn address(&self) -> &HostAddress {
        &self.address
    }

    /// Fully-qualified domain name, empty when the scanner had none.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS fingerprint guess, empty when the scanner had none.
    pub fn os_guess(&self) -> &str {
        &self.os_guess
    }

    /// One flag per tracked port of the schema the record was built with.
    pub fn common_port_flags(&self) -> &[bool] {
        &self.common_port_flags
    }

    pub fn other_ports(&self) -> &[Port] {
        &self.other_ports
    }

    /// Untracked open ports as report text, e.g. `"8080, 8443"`.
    pub fn other_ports_joined(&self) -> String {
        self.other_ports
            .iter()
            .map(Port::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Tracked ports that are open on this host.
    pub fn open_tracked_ports<'a>(
        &'a self,
        schema: &'a ReportSchema,
    ) -> impl Iterator<Item = Port> + 'a {
        schema
            .tracked_ports()
            .iter()
            .zip(&self.common_port_flags)
            .filter(|(_, open)| **open)
            .map(|(port, _)| *port)
    }
}

/// Order hosts by numeric address. Ties keep their input order.
pub fn sort_hosts(hosts: &[HostRecord]) -> Vec<HostRecord> {
    let mut sorted = hosts.to_vec();
    sorted.sort_by(|a, b| a.address.cmp(&b.address));
    sorted
}
