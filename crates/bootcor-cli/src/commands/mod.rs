//! CLI command implementations.

pub mod bootstrap;
pub mod correlate;
