//! Core type definitions using newtype patterns for type safety.
//!
//! Addresses and ports are parsed once at the edge of the parser so the
//! rest of the crate never handles raw scanner text for them.

mod address;
mod port;

pub use address::{AddressError, HostAddress};
pub use port::{Port, PortError};
