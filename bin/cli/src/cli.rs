//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Check, render and submit flowcanvas workflow documents
#[derive(Parser, Debug)]
#[command(name = "flowcanvas", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Check a workflow document's structural integrity
    Check {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
    /// Render a workflow as SVG
    Render {
        /// Path to the workflow JSON file
        file: PathBuf,
        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save a workflow through the configured backend
    Save {
        /// Path to the workflow JSON file
        file: PathBuf,
        /// Name to save under; defaults to the document's name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Queue a workflow for execution through the configured backend
    Execute {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
}
