//! CLI command definitions
//!
//! Defines the clap commands for the treetest CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether packages are available on this machine
    Which {
        /// Package names to look up
        #[arg(required = true)]
        packages: Vec<String>,

        /// Print the probe report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the groups and cases a dataset file describes
    List {
        /// Path to a YAML or JSON dataset file
        dataset: PathBuf,

        /// Root namespace for group labels
        #[arg(long, default_value = "root")]
        root: String,
    },
}
