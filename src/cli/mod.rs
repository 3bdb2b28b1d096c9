//! CLI support for the `snmp-set-action` stub host.
//!
//! This module provides argument parsing and result output. It is only
//! available with the `cli` feature.

pub mod args;
pub mod output;
