//! CLI module for the IP list synchronizer.
//!
//! This module provides the command-line arguments and the rendering of the
//! final sync report.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat};
pub use output::OutputFormatter;
