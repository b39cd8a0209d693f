//! Command-line interface.

pub mod commands;
pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tryst",
    about = "Private encounter journal with a pattern-derived recommendation engine",
    version
)]
pub struct Cli {
    /// Emit machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the journal in the current directory
    Init(commands::init::InitArgs),
    /// Manage partners
    Partner(commands::partner::PartnerArgs),
    /// Log a new encounter
    Log(commands::encounter::LogArgs),
    /// List logged encounters
    Encounters(commands::encounter::ListArgs),
    /// Ask the engine what the next encounter should look like
    Recommend(commands::recommend::RecommendArgs),
    /// Show journal-wide statistics
    Stats(commands::stats::StatsArgs),
}

/// Print an error in the requested format and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
