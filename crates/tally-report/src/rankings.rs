//! Top-5 ranking tables printed to the console after a run.
//!
//! Rankings sort descending by the ranked count with ties kept in source
//! row order, and render as fixed-width plain-text tables.

use tally_core::models::{BillSummary, LegislatorSummaryTable};

/// Number of rows shown per ranking table.
pub const TOP_N: usize = 5;

// ── Ranking selection ─────────────────────────────────────────────────────────

/// Indices of the top `n` rows by `key`, descending.
///
/// `sort_by` is stable, so rows with equal keys keep their original order.
fn top_indices<T>(rows: &[T], n: usize, key: impl Fn(&T) -> u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| key(&rows[b]).cmp(&key(&rows[a])));
    order.truncate(n);
    order
}

// ── Legislator rankings ───────────────────────────────────────────────────────

/// "Top legislators by number of bills supported" table.
pub fn legislators_by_supported(table: &LegislatorSummaryTable) -> String {
    legislator_ranking(
        table,
        "Top legislators by number of bills supported:",
        |row| row.num_supported_bills,
    )
}

/// "Top legislators by number of bills opposed" table.
pub fn legislators_by_opposed(table: &LegislatorSummaryTable) -> String {
    legislator_ranking(table, "Top legislators by number of bills opposed:", |row| {
        row.num_opposed_bills
    })
}

fn legislator_ranking(
    table: &LegislatorSummaryTable,
    title: &str,
    key: impl Fn(&tally_core::models::LegislatorSummary) -> u64,
) -> String {
    let rows: Vec<Vec<String>> = top_indices(&table.rows, TOP_N, key)
        .into_iter()
        .map(|i| {
            let row = &table.rows[i];
            vec![
                row.legislator.name.clone(),
                row.num_supported_bills.to_string(),
                row.num_opposed_bills.to_string(),
            ]
        })
        .collect();

    render_table(
        title,
        &["name", "num_supported_bills", "num_opposed_bills"],
        &rows,
    )
}

// ── Bill rankings ─────────────────────────────────────────────────────────────

/// "Top bills by number of supporters" table.
pub fn bills_by_supporters(bills: &[BillSummary]) -> String {
    bill_ranking(bills, "Top bills by number of supporters:", |b| {
        b.supporter_count
    })
}

/// "Top bills by number of opposers" table.
pub fn bills_by_opposers(bills: &[BillSummary]) -> String {
    bill_ranking(bills, "Top bills by number of opposers:", |b| b.opposer_count)
}

fn bill_ranking(bills: &[BillSummary], title: &str, key: impl Fn(&BillSummary) -> u64) -> String {
    let rows: Vec<Vec<String>> = top_indices(bills, TOP_N, key)
        .into_iter()
        .map(|i| {
            let bill = &bills[i];
            vec![
                bill.title.clone(),
                bill.supporter_count.to_string(),
                bill.opposer_count.to_string(),
                bill.primary_sponsor.clone(),
            ]
        })
        .collect();

    render_table(
        title,
        &["title", "supporter_count", "opposer_count", "primary_sponsor"],
        &rows,
    )
}

// ── Plain-text table rendering ────────────────────────────────────────────────

/// Render a title line plus a fixed-width table.
///
/// Column widths fit the widest cell (or header); columns are separated by
/// two spaces and left-aligned.
fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            // No trailing padding on the last column.
            if i + 1 < cells.len() {
                for _ in cell.len()..widths[i] {
                    line.push(' ');
                }
            }
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&format_row(&header_cells));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
