//! The `flowcanvas` command-line tool.
//!
//! Checks workflow documents for structural integrity, renders them to SVG
//! and submits them to the REST backend for saving or execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::{load_workflow, run};
pub use config::CliConfig;
pub use error::CliError;
