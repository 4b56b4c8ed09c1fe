//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Screen-time accounting API.
///
/// Serves a small hypermedia JSON API over the per-user usage and lock
/// state maintained by the time-tracking daemon.
#[derive(Debug, Parser)]
#[command(name = "st-api", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
