//! Persists the two summary tables as CSV.
//!
//! Output filenames are fixed; only the destination directory varies.
//! Writing is deterministic: unchanged input produces byte-identical
//! output files.

use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tally_core::models::{BillSummary, LegislatorSummaryTable};
use tracing::info;

use crate::analysis::AnalysisResult;

/// Output filename for the augmented legislators table.
pub const LEGISLATOR_SUMMARY_FILE: &str = "legislators-support-oppose-count.csv";
/// Output filename for the bill summary table.
pub const BILL_SUMMARY_FILE: &str = "bills-support-oppose-count.csv";

// ── Public API ────────────────────────────────────────────────────────────────

/// Write both summary tables into `output_dir`.
///
/// Returns the two file paths written, legislators first.
pub fn write_summaries(output_dir: &Path, result: &AnalysisResult) -> Result<(PathBuf, PathBuf)> {
    let legislators_path = write_legislator_summary(output_dir, &result.legislators)?;
    let bills_path = write_bill_summary(output_dir, &result.bills)?;
    Ok((legislators_path, bills_path))
}

/// Write the legislators table (all source columns plus the two counts).
pub fn write_legislator_summary(
    output_dir: &Path,
    table: &LegislatorSummaryTable,
) -> Result<PathBuf> {
    let path = output_dir.join(LEGISLATOR_SUMMARY_FILE);
    let mut writer = open_writer(&path)?;

    writer
        .write_record(&table.headers)
        .map_err(|source| write_error(&path, source))?;

    for row in &table.rows {
        let mut record: Vec<String> = row.legislator.fields.clone();
        record.push(row.num_supported_bills.to_string());
        record.push(row.num_opposed_bills.to_string());
        writer
            .write_record(&record)
            .map_err(|source| write_error(&path, source))?;
    }

    writer.flush().map_err(TallyError::Io)?;
    info!("Legislator vote summary saved to {}", path.display());
    Ok(path)
}

/// Write the bill summary table (exactly the five derived columns).
pub fn write_bill_summary(output_dir: &Path, bills: &[BillSummary]) -> Result<PathBuf> {
    let path = output_dir.join(BILL_SUMMARY_FILE);
    let mut writer = open_writer(&path)?;

    for bill in bills {
        writer
            .serialize(bill)
            .map_err(|source| write_error(&path, source))?;
    }
    // serialize() only emits headers once a record is written; an empty
    // table still needs its header row.
    if bills.is_empty() {
        writer
            .write_record([
                "id",
                "title",
                "supporter_count",
                "opposer_count",
                "primary_sponsor",
            ])
            .map_err(|source| write_error(&path, source))?;
    }

    writer.flush().map_err(TallyError::Io)?;
    info!("Bill vote summary saved to {}", path.display());
    Ok(path)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: csv::Error) -> TallyError {
    TallyError::CsvWrite {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
