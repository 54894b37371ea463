//! Defines the command-line arguments and subcommands for the report CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::batch::DEFAULT_OUTPUT_NAME;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "sanity-report",
    version,
    about = "Renders nightly sanity test results into an HTML report."
)]
pub struct ReportArgs {
    /// Catalog file (.yaml, .yml or .json) replacing the built-in layout.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a single results document.
    Render {
        /// Path to the results document (report_data.json).
        #[arg(required = true)]
        file: PathBuf,
        /// Write the report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run label for the heading. Defaults to the input's directory name.
        #[arg(long)]
        label: Option<String>,
    },
    /// Render every run found under a reports directory.
    Batch {
        /// Root directory holding one subdirectory per run.
        #[arg(required = true)]
        root: PathBuf,
        /// File name of the report written beside each results document.
        #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
        output_name: String,
    },
    /// Print the active catalog as YAML.
    Catalog,
}
