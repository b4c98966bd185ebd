//! Configuration management for portgrid.
//!
//! Settings live in an XDG-compliant configuration directory and describe
//! the report layout plus parser defaults.

mod settings;

pub use settings::{AppSettings, Paths};
