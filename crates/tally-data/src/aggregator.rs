//! Support/oppose counting for legislators and bills.
//!
//! Both aggregation passes share one grouping primitive so the counting
//! semantics cannot drift between them: the legislator pass groups vote
//! results by `legislator_id` directly, the bill pass first joins each
//! result to its bill through the votes table.

use std::collections::HashMap;

use tally_core::models::{
    Bill, BillSummary, LegislatorSummary, LegislatorSummaryTable, LegislatorTable, Vote,
    VoteResult, VoteType,
};
use tracing::debug;

/// Sponsor name used when a bill's `Primary Sponsor` id resolves to no
/// legislator.
pub const UNKNOWN_SPONSOR: &str = "Unknown";

// ── Vote-type counter ─────────────────────────────────────────────────────────

/// Support and oppose totals for one grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteCounts {
    pub support: u64,
    pub oppose: u64,
}

/// Count support/oppose votes grouped by an arbitrary key.
///
/// Only keys with at least one counted row appear in the map; absent keys
/// mean zero. Codes outside {1, 2} are ignored. Rows are never deduplicated
/// — every qualifying row counts.
pub fn count_by_key(pairs: impl IntoIterator<Item = (u64, i64)>) -> HashMap<u64, VoteCounts> {
    let mut counts: HashMap<u64, VoteCounts> = HashMap::new();
    for (key, code) in pairs {
        match VoteType::from_code(code) {
            VoteType::Support => counts.entry(key).or_default().support += 1,
            VoteType::Oppose => counts.entry(key).or_default().oppose += 1,
            VoteType::Other(_) => {}
        }
    }
    counts
}

// ── Legislator pass ───────────────────────────────────────────────────────────

/// Attach `num_supported_bills` / `num_opposed_bills` to every legislator.
///
/// All source rows survive in source order; legislators with no vote
/// results get zero counts.
pub fn summarize_legislators(
    legislators: &LegislatorTable,
    vote_results: &[VoteResult],
) -> LegislatorSummaryTable {
    let counts = count_by_key(
        vote_results
            .iter()
            .map(|r| (r.legislator_id, r.vote_type)),
    );

    let mut headers = legislators.headers.clone();
    headers.push("num_supported_bills".to_string());
    headers.push("num_opposed_bills".to_string());

    let rows = legislators
        .rows
        .iter()
        .map(|legislator| {
            let c = counts.get(&legislator.id).copied().unwrap_or_default();
            LegislatorSummary {
                legislator: legislator.clone(),
                num_supported_bills: c.support,
                num_opposed_bills: c.oppose,
            }
        })
        .collect();

    LegislatorSummaryTable { headers, rows }
}

// ── Bill pass ─────────────────────────────────────────────────────────────────

/// Output of the bill aggregation pass.
#[derive(Debug, Clone)]
pub struct BillPass {
    /// Per-bill summaries in source row order.
    pub bills: Vec<BillSummary>,
    /// Vote-result rows whose `vote_id` matched no vote, excluded from the
    /// counts above.
    pub unmatched_vote_results: usize,
}

/// Attach supporter/opposer counts and the resolved sponsor name to every
/// bill.
///
/// Vote results are first joined to their bill through the votes table;
/// results whose `vote_id` matches no vote are dropped from this pass only
/// and reported in [`BillPass::unmatched_vote_results`]. Sponsor resolution
/// is a left join — an unresolved sponsor id yields [`UNKNOWN_SPONSOR`],
/// never an error.
pub fn summarize_bills(
    bills: &[Bill],
    votes: &[Vote],
    vote_results: &[VoteResult],
    legislators: &LegislatorTable,
) -> BillPass {
    let bill_of_vote: HashMap<u64, u64> = votes.iter().map(|v| (v.id, v.bill_id)).collect();

    let mut unmatched = 0usize;
    let counts = count_by_key(vote_results.iter().filter_map(|r| {
        match bill_of_vote.get(&r.vote_id) {
            Some(&bill_id) => Some((bill_id, r.vote_type)),
            None => {
                unmatched += 1;
                None
            }
        }
    }));
    if unmatched > 0 {
        debug!("{} vote results had no matching vote; excluded from bill counts", unmatched);
    }

    let name_of_legislator: HashMap<u64, &str> = legislators
        .rows
        .iter()
        .map(|l| (l.id, l.name.as_str()))
        .collect();

    let bills = bills
        .iter()
        .map(|bill| {
            let c = counts.get(&bill.id).copied().unwrap_or_default();
            let primary_sponsor = bill
                .sponsor_id
                .and_then(|id| name_of_legislator.get(&id).copied())
                .unwrap_or(UNKNOWN_SPONSOR)
                .to_string();
            BillSummary {
                id: bill.id,
                title: bill.title.clone(),
                supporter_count: c.support,
                opposer_count: c.oppose,
                primary_sponsor,
            }
        })
        .collect();

    BillPass {
        bills,
        unmatched_vote_results: unmatched,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
