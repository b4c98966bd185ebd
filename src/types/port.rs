//! Port number type.
//!
//! The `Port` newtype keeps port numbers out of the stringly-typed soup
//! of a grepable scan line. Any value that fits in 16 bits is accepted,
//! matching what Nmap itself will print.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A network port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Create a new Port.
    #[inline]
    pub const fn new(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Error type for port parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("invalid port number: '{0}'")]
    InvalidFormat(String),
    #[error("port {0} is out of valid range (0-65535)")]
    OutOfRange(String),
}

impl FromStr for Port {
    type Err = PortError;

    /// Parse a bare run of ASCII digits. Signs and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PortError::InvalidFormat(s.to_string()));
        }
        s.parse::<u16>()
            .map(Self)
            .map_err(|_| PortError::OutOfRange(s.to_string()))
    }
}
