//! Host address type with numeric ordering.
//!
//! A `HostAddress` keeps the address exactly as the scanner printed it
//! alongside its four octets, so reports show the original text while
//! sorting stays numeric (10.0.0.9 before 10.0.0.10).

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A dotted IPv4 host address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAddress {
    text: String,
    octets: [u8; 4],
}

impl HostAddress {
    /// The address as it appeared in the input.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The numeric sort key.
    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }
}

/// Error returned when a token is not a dotted IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a dotted IPv4 address: '{0}'")]
pub struct AddressError(pub String);

impl FromStr for HostAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ip: Ipv4Addr = s.parse().map_err(|_| AddressError(s.to_string()))?;
        Ok(Self {
            text: s.to_string(),
            octets: ip.octets(),
        })
    }
}

impl Ord for HostAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.octets.cmp(&other.octets)
    }
}

impl PartialOrd for HostAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for HostAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
