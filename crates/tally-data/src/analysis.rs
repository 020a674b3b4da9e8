//! Main analysis pipeline for the vote tally.
//!
//! Runs both aggregation passes over the loaded tables and returns an
//! [`AnalysisResult`] ready for the writer and report layers.

use std::time::Instant;

use tally_core::models::{Bill, BillSummary, LegislatorSummaryTable, LegislatorTable, Vote, VoteResult};
use tracing::info;

use crate::aggregator::{summarize_bills, summarize_legislators};

// ── Public types ──────────────────────────────────────────────────────────────

/// The four loaded input tables.
///
/// Built by the reader layer and handed to [`run_analysis`]; the pipeline
/// itself never touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct TallyInput {
    pub legislators: LegislatorTable,
    pub bills: Vec<Bill>,
    pub votes: Vec<Vote>,
    pub vote_results: Vec<VoteResult>,
}

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// Row counts of the four input tables.
    pub legislators_read: usize,
    pub bills_read: usize,
    pub votes_read: usize,
    pub vote_results_read: usize,
    /// Vote-result rows whose `vote_id` matched no vote. These are excluded
    /// from the bill pass (the legislator pass still counts them).
    pub unmatched_vote_results: usize,
    /// Wall-clock seconds spent in both aggregation passes.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Legislator table augmented with support/oppose counts.
    pub legislators: LegislatorSummaryTable,
    /// Per-bill summaries in source row order.
    pub bills: Vec<BillSummary>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full tally pipeline.
///
/// 1. Count each legislator's support/oppose votes.
/// 2. Join vote results to bills through the votes table and count per bill.
/// 3. Resolve each bill's sponsor name.
/// 4. Return both summary tables plus run metadata.
pub fn run_analysis(input: &TallyInput) -> AnalysisResult {
    let start = Instant::now();

    let legislators = summarize_legislators(&input.legislators, &input.vote_results);
    let bill_pass = summarize_bills(
        &input.bills,
        &input.votes,
        &input.vote_results,
        &input.legislators,
    );

    let metadata = AnalysisMetadata {
        legislators_read: input.legislators.rows.len(),
        bills_read: input.bills.len(),
        votes_read: input.votes.len(),
        vote_results_read: input.vote_results.len(),
        unmatched_vote_results: bill_pass.unmatched_vote_results,
        transform_time_seconds: start.elapsed().as_secs_f64(),
    };

    info!(
        "Tallied {} vote results across {} legislators and {} bills",
        metadata.vote_results_read, metadata.legislators_read, metadata.bills_read
    );

    AnalysisResult {
        legislators,
        bills: bill_pass.bills,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
