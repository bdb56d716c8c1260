//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// issuebridge - run tracker operations from batch job files
#[derive(Parser, Debug)]
#[command(name = "issuebridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the job's credentials can reach the tracker
    Check {
        /// Job definition file (YAML)
        job: PathBuf,
    },

    /// Execute a batch job and print output records as JSON lines
    Run {
        /// Job definition file (YAML)
        job: PathBuf,

        /// Pretty-print each output record
        #[arg(long)]
        pretty: bool,
    },

    /// Run an option loader and print its (name, value) entries
    Options {
        /// Loader name (projects, issue_types, users, groups, labels,
        /// priorities)
        loader: String,

        /// Job definition file (YAML); only its credentials are used
        job: PathBuf,
    },
}
