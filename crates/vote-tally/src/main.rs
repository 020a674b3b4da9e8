mod bootstrap;

use anyhow::Result;
use clap::Parser;
use tally_core::settings::Settings;
use tally_data::analysis::run_analysis;
use tally_data::reader::{load_tables, resolve_sources};
use tally_data::writer::write_summaries;
use tally_report::rankings;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    bootstrap::ensure_output_dir(&settings.output_folder)?;

    tracing::info!("vote-tally v{} starting", env!("CARGO_PKG_VERSION"));

    // Resolve and load all four input tables before producing any output,
    // so a fatal input error never leaves a partial run behind.
    let sources = resolve_sources(&settings)?;
    tracing::info!(
        "Detected CSV files: legislators={}, bills={}, votes={}, vote_results={}",
        sources.legislators.display(),
        sources.bills.display(),
        sources.votes.display(),
        sources.vote_results.display()
    );
    let input = load_tables(&sources)?;

    let result = run_analysis(&input);

    let (legislators_path, bills_path) = write_summaries(&settings.output_folder, &result)?;

    println!("{}", rankings::legislators_by_supported(&result.legislators));
    println!("{}", rankings::legislators_by_opposed(&result.legislators));
    println!("{}", rankings::bills_by_supporters(&result.bills));
    println!("{}", rankings::bills_by_opposers(&result.bills));

    tracing::info!(
        "Wrote {} and {} ({} vote results, {} unmatched, {:.3}s)",
        legislators_path.display(),
        bills_path.display(),
        result.metadata.vote_results_read,
        result.metadata.unmatched_vote_results,
        result.metadata.transform_time_seconds
    );

    Ok(())
}
