//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taskload")]
#[command(about = "Overcooked 2 level task-load extraction", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every level from the workbook and write the JSON output
    #[command(visible_alias = "x")]
    Extract {
        /// Path to the task analysis workbook (uses configured default if not provided)
        #[arg(short, long, env = "TASKLOAD_INPUT")]
        input: Option<PathBuf>,

        /// Path of the JSON file to write (uses configured default if not provided)
        #[arg(short, long, env = "TASKLOAD_OUTPUT")]
        output: Option<PathBuf>,

        /// Previous output to carry video links from (defaults to the output path)
        #[arg(long)]
        prior: Option<PathBuf>,

        /// Cell text that heads an obstacle list
        #[arg(long)]
        marker: Option<String>,

        /// Text written for values that need manual input
        #[arg(long)]
        sentinel: Option<String>,
    },

    /// List every obstacle marker in the workbook as JSON
    #[command(visible_alias = "o")]
    Obstacles {
        /// Path to the task analysis workbook (uses configured default if not provided)
        #[arg(short, long, env = "TASKLOAD_INPUT")]
        input: Option<PathBuf>,

        /// Cell text that heads an obstacle list
        #[arg(long)]
        marker: Option<String>,
    },

    /// Dump the top-left grid of a sheet to diagnose its layout
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the task analysis workbook (uses configured default if not provided)
        #[arg(short, long, env = "TASKLOAD_INPUT")]
        input: Option<PathBuf>,

        /// Sheet to dump (e.g. "World 2")
        #[arg(short, long, default_value = "World 1")]
        sheet: String,

        /// Number of rows to show
        #[arg(long, default_value_t = 85)]
        rows: usize,

        /// Number of columns to show
        #[arg(long, default_value_t = 30)]
        cols: usize,
    },

    /// Recompute challenge scores on an existing output file
    ///
    /// The file is rewritten in the standard layout: keys that are not
    /// level keys, and record keys that are not known fields, are dropped
    /// with a warning.
    Score {
        /// Path to a JSON output file
        input: PathBuf,

        /// Where to write the rescored file (defaults to rewriting the input in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only print the score breakdown of one level (e.g. Level_1_3)
        #[arg(short, long)]
        level: Option<String>,

        /// Text used for values that need manual input
        #[arg(long)]
        sentinel: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default workbook path
        #[arg(long)]
        input: Option<PathBuf>,

        /// Set default output path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Set default obstacle marker
        #[arg(long)]
        marker: Option<String>,

        /// Set default missing-value text
        #[arg(long)]
        sentinel: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
