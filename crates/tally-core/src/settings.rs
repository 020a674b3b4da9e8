use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Legislative vote tallying from CSV data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vote-tally",
    about = "Summarise legislator and bill voting records from CSV data",
    version
)]
pub struct Settings {
    /// Folder the two summary CSVs are written to (created if absent)
    #[arg(long, default_value = ".")]
    pub output_folder: PathBuf,

    /// Folder scanned when input files are discovered by keyword
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Explicit path to the legislators CSV (skips keyword discovery)
    #[arg(long)]
    pub legislators: Option<PathBuf>,

    /// Explicit path to the bills CSV (skips keyword discovery)
    #[arg(long)]
    pub bills: Option<PathBuf>,

    /// Explicit path to the votes CSV (skips keyword discovery)
    #[arg(long)]
    pub votes: Option<PathBuf>,

    /// Explicit path to the vote-results CSV (skips keyword discovery)
    #[arg(long)]
    pub vote_results: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
