use serde::Serialize;

// ── Vote categorisation ───────────────────────────────────────────────────────

/// Categorical decode of the integer `vote_type` field on a vote-result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteType {
    /// Code `1` — the legislator voted for the bill.
    Support,
    /// Code `2` — the legislator voted against the bill.
    Oppose,
    /// Any other code. Contributes to neither count.
    Other(i64),
}

impl VoteType {
    /// Decode a raw `vote_type` code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => VoteType::Support,
            2 => VoteType::Oppose,
            other => VoteType::Other(other),
        }
    }
}

// ── Input rows ────────────────────────────────────────────────────────────────

/// One row of the legislators table.
///
/// `fields` keeps the complete original record (in source column order) so
/// that columns beyond `id`/`name` pass through to the output unchanged.
#[derive(Debug, Clone)]
pub struct Legislator {
    pub id: u64,
    pub name: String,
    /// All cell values of the source row, including `id` and `name`.
    pub fields: Vec<String>,
}

/// The legislators table with its source header row.
///
/// Header order matters: the summary output re-emits these headers followed
/// by the two derived count columns.
#[derive(Debug, Clone, Default)]
pub struct LegislatorTable {
    pub headers: Vec<String>,
    pub rows: Vec<Legislator>,
}

/// One row of the bills table.
///
/// The bill output is a narrowing projection, so columns beyond the three
/// required ones are not carried.
#[derive(Debug, Clone)]
pub struct Bill {
    pub id: u64,
    pub title: String,
    /// Id of the sponsoring legislator from the `Primary Sponsor` column.
    /// `None` when the cell is empty.
    pub sponsor_id: Option<u64>,
}

/// One row of the votes table, linking a vote to its bill.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: u64,
    pub bill_id: u64,
}

/// One row of the vote-results table: a single legislator's vote cast in a
/// single vote.
#[derive(Debug, Clone)]
pub struct VoteResult {
    pub vote_id: u64,
    pub legislator_id: u64,
    /// Raw code; decode with [`VoteType::from_code`] at counting time.
    pub vote_type: i64,
}

// ── Output rows ───────────────────────────────────────────────────────────────

/// A legislator row augmented with its support/oppose totals.
#[derive(Debug, Clone)]
pub struct LegislatorSummary {
    pub legislator: Legislator,
    pub num_supported_bills: u64,
    pub num_opposed_bills: u64,
}

/// The augmented legislators table: source headers plus the two derived
/// count columns, rows in source order.
#[derive(Debug, Clone, Default)]
pub struct LegislatorSummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<LegislatorSummary>,
}

/// A bill's derived summary row. Field order matches the output column
/// order, so this serializes straight into the bills CSV.
#[derive(Debug, Clone, Serialize)]
pub struct BillSummary {
    pub id: u64,
    pub title: String,
    pub supporter_count: u64,
    pub opposer_count: u64,
    pub primary_sponsor: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
