//! CSV file discovery and loading for the vote tally pipeline.
//!
//! Locates the four input tables (by explicit path or by filename keyword)
//! and parses them into the typed rows from [`tally_core::models`].

use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tally_core::models::{Bill, Legislator, LegislatorTable, Vote, VoteResult};
use tally_core::settings::Settings;
use tracing::{debug, warn};

use crate::analysis::TallyInput;
use crate::writer::{BILL_SUMMARY_FILE, LEGISLATOR_SUMMARY_FILE};

/// Filename keywords used when discovering input files.
pub const LEGISLATORS_KEYWORD: &str = "legislators";
pub const BILLS_KEYWORD: &str = "bills";
pub const VOTES_KEYWORD: &str = "votes";
pub const VOTE_RESULTS_KEYWORD: &str = "vote_results";

// ── Source resolution ─────────────────────────────────────────────────────────

/// Resolved paths of the four input tables.
///
/// Built once up front and passed into the loaders, so the core never scans
/// the filesystem itself.
#[derive(Debug, Clone)]
pub struct TableSources {
    pub legislators: PathBuf,
    pub bills: PathBuf,
    pub votes: PathBuf,
    pub vote_results: PathBuf,
}

/// Resolve the four table sources from the CLI settings.
///
/// An explicit `--legislators`/`--bills`/... path always wins; tables
/// without one fall back to keyword discovery in the data directory.
pub fn resolve_sources(settings: &Settings) -> Result<TableSources> {
    let dir = settings.data_dir.as_path();
    let resolve = |explicit: &Option<PathBuf>, keyword: &str| -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.clone()),
            None => find_csv_file(dir, keyword),
        }
    };

    Ok(TableSources {
        legislators: resolve(&settings.legislators, LEGISLATORS_KEYWORD)?,
        bills: resolve(&settings.bills, BILLS_KEYWORD)?,
        votes: resolve(&settings.votes, VOTES_KEYWORD)?,
        vote_results: resolve(&settings.vote_results, VOTE_RESULTS_KEYWORD)?,
    })
}

/// Find the first `.csv` file in `dir` whose name contains `keyword`
/// (case-insensitive).
///
/// The scan is non-recursive and candidates are checked in sorted path
/// order, so the "first match" is deterministic across platforms. The two
/// fixed output filenames are never candidates: `bills-support-oppose-count.csv`
/// contains "bills" and sorts before `bills.csv`, so a rerun writing into
/// the data directory would otherwise rediscover its own output as input.
pub fn find_csv_file(dir: &Path, keyword: &str) -> Result<PathBuf> {
    let needle = keyword.to_lowercase();

    let mut candidates: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| !is_output_file(name) && name.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .ok_or_else(|| TallyError::MissingInput {
            keyword: keyword.to_string(),
            dir: dir.to_path_buf(),
        })
}

/// A previous run's output file is never a valid input.
fn is_output_file(name: &str) -> bool {
    name.eq_ignore_ascii_case(LEGISLATOR_SUMMARY_FILE) || name.eq_ignore_ascii_case(BILL_SUMMARY_FILE)
}

// ── Table loading ─────────────────────────────────────────────────────────────

/// Load all four input tables.
pub fn load_tables(sources: &TableSources) -> Result<TallyInput> {
    let legislators = load_legislators(&sources.legislators)?;
    let bills = load_bills(&sources.bills)?;
    let votes = load_votes(&sources.votes)?;
    let vote_results = load_vote_results(&sources.vote_results)?;

    debug!(
        "Loaded {} legislators, {} bills, {} votes, {} vote results",
        legislators.rows.len(),
        bills.len(),
        votes.len(),
        vote_results.len()
    );

    Ok(TallyInput {
        legislators,
        bills,
        votes,
        vote_results,
    })
}

/// Load the legislators table, preserving every source column.
pub fn load_legislators(path: &Path) -> Result<LegislatorTable> {
    let mut reader = open_csv(path)?;
    let headers = headers_of(&mut reader, path)?;
    let id_idx = column_index(&headers, "id", path)?;
    let name_idx = column_index(&headers, "name", path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TallyError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let id = parse_key(record.get(id_idx).unwrap_or(""), "id", path)?;
        let name = record.get(name_idx).unwrap_or("").to_string();
        rows.push(Legislator {
            id,
            name,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(LegislatorTable { headers, rows })
}

/// Load the bills table.
///
/// `Primary Sponsor` cells that are empty or not integers resolve to no
/// sponsor rather than failing; sponsor resolution downstream is a left
/// join and never raises.
pub fn load_bills(path: &Path) -> Result<Vec<Bill>> {
    let mut reader = open_csv(path)?;
    let headers = headers_of(&mut reader, path)?;
    let id_idx = column_index(&headers, "id", path)?;
    let title_idx = column_index(&headers, "title", path)?;
    let sponsor_idx = column_index(&headers, "Primary Sponsor", path)?;

    let mut bills = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TallyError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let id = parse_key(record.get(id_idx).unwrap_or(""), "id", path)?;
        let title = record.get(title_idx).unwrap_or("").to_string();

        let sponsor_cell = record.get(sponsor_idx).unwrap_or("").trim();
        let sponsor_id = if sponsor_cell.is_empty() {
            None
        } else {
            match sponsor_cell.parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(
                        "Bill {}: sponsor id '{}' is not an integer; treating as unknown",
                        id, sponsor_cell
                    );
                    None
                }
            }
        };

        bills.push(Bill {
            id,
            title,
            sponsor_id,
        });
    }

    Ok(bills)
}

/// Load the votes table.
pub fn load_votes(path: &Path) -> Result<Vec<Vote>> {
    let mut reader = open_csv(path)?;
    let headers = headers_of(&mut reader, path)?;
    let id_idx = column_index(&headers, "id", path)?;
    let bill_idx = column_index(&headers, "bill_id", path)?;

    let mut votes = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TallyError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        votes.push(Vote {
            id: parse_key(record.get(id_idx).unwrap_or(""), "id", path)?,
            bill_id: parse_key(record.get(bill_idx).unwrap_or(""), "bill_id", path)?,
        });
    }

    Ok(votes)
}

/// Load the vote-results table. The raw `vote_type` code is kept as-is;
/// codes outside {1, 2} are categorised (and ignored) at counting time.
pub fn load_vote_results(path: &Path) -> Result<Vec<VoteResult>> {
    let mut reader = open_csv(path)?;
    let headers = headers_of(&mut reader, path)?;
    let vote_idx = column_index(&headers, "vote_id", path)?;
    let legislator_idx = column_index(&headers, "legislator_id", path)?;
    let type_idx = column_index(&headers, "vote_type", path)?;

    let mut results = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TallyError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let vote_type_cell = record.get(type_idx).unwrap_or("").trim();
        let vote_type =
            vote_type_cell
                .parse::<i64>()
                .map_err(|_| TallyError::InvalidCell {
                    column: "vote_type".to_string(),
                    value: vote_type_cell.to_string(),
                    path: path.to_path_buf(),
                })?;
        results.push(VoteResult {
            vote_id: parse_key(record.get(vote_idx).unwrap_or(""), "vote_id", path)?,
            legislator_id: parse_key(
                record.get(legislator_idx).unwrap_or(""),
                "legislator_id",
                path,
            )?,
            vote_type,
        });
    }

    Ok(results)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|source| TallyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn headers_of(reader: &mut csv::Reader<std::fs::File>, path: &Path) -> Result<Vec<String>> {
    let headers = reader.headers().map_err(|source| TallyError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(headers.iter().map(str::to_string).collect())
}

/// Position of `name` in the header row, or a `MissingColumn` error.
fn column_index(headers: &[String], name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| TallyError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Parse an integer join-key cell. Non-integer keys are fatal.
fn parse_key(cell: &str, column: &str, path: &Path) -> Result<u64> {
    cell.trim()
        .parse::<u64>()
        .map_err(|_| TallyError::InvalidCell {
            column: column.to_string(),
            value: cell.to_string(),
            path: path.to_path_buf(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── find_csv_file ─────────────────────────────────────────────────────────

    #[test]
    fn test_find_csv_file_by_keyword() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "legislators.csv", &["id,name"]);
        write_csv(dir.path(), "bills.csv", &["id,title,Primary Sponsor"]);

        let found = find_csv_file(dir.path(), "legislators").unwrap();
        assert_eq!(found.file_name().unwrap(), "legislators.csv");
    }

    #[test]
    fn test_find_csv_file_case_insensitive() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "Legislators-2024.csv", &["id,name"]);

        let found = find_csv_file(dir.path(), "legislators").unwrap();
        assert_eq!(found.file_name().unwrap(), "Legislators-2024.csv");
    }

    #[test]
    fn test_find_csv_file_first_match_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "b-votes.csv", &["id,bill_id"]);
        write_csv(dir.path(), "a-votes.csv", &["id,bill_id"]);

        let found = find_csv_file(dir.path(), "votes").unwrap();
        assert_eq!(found.file_name().unwrap(), "a-votes.csv");
    }

    #[test]
    fn test_find_csv_file_ignores_non_csv() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "votes.txt", &["id,bill_id"]);

        let err = find_csv_file(dir.path(), "votes").unwrap_err();
        assert!(matches!(err, TallyError::MissingInput { .. }));
    }

    #[test]
    fn test_find_csv_file_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let err = find_csv_file(dir.path(), "legislators").unwrap_err();
        assert!(err.to_string().contains("legislators"));
    }

    #[test]
    fn test_find_csv_file_skips_bill_summary_output() {
        let dir = TempDir::new().unwrap();
        // The output file contains "bills" and sorts before "bills.csv".
        write_csv(
            dir.path(),
            "bills-support-oppose-count.csv",
            &["id,title,supporter_count,opposer_count,primary_sponsor"],
        );
        write_csv(dir.path(), "bills.csv", &["id,title,Primary Sponsor"]);

        let found = find_csv_file(dir.path(), "bills").unwrap();
        assert_eq!(found.file_name().unwrap(), "bills.csv");
    }

    #[test]
    fn test_find_csv_file_skips_legislator_summary_output() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "legislators-support-oppose-count.csv",
            &["id,name,num_supported_bills,num_opposed_bills"],
        );
        write_csv(dir.path(), "legislators.csv", &["id,name"]);

        let found = find_csv_file(dir.path(), "legislators").unwrap();
        assert_eq!(found.file_name().unwrap(), "legislators.csv");
    }

    #[test]
    fn test_find_csv_file_output_file_alone_is_no_match() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "bills-support-oppose-count.csv",
            &["id,title,supporter_count,opposer_count,primary_sponsor"],
        );

        let err = find_csv_file(dir.path(), "bills").unwrap_err();
        assert!(matches!(err, TallyError::MissingInput { .. }));
    }

    #[test]
    fn test_votes_keyword_does_not_match_vote_results() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "vote_results.csv", &["vote_id,legislator_id,vote_type"]);
        write_csv(dir.path(), "votes.csv", &["id,bill_id"]);

        let found = find_csv_file(dir.path(), "votes").unwrap();
        assert_eq!(found.file_name().unwrap(), "votes.csv");
    }

    // ── resolve_sources ───────────────────────────────────────────────────────

    #[test]
    fn test_resolve_sources_by_discovery() {
        use clap::Parser;

        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "legislators.csv", &["id,name"]);
        write_csv(dir.path(), "bills.csv", &["id,title,Primary Sponsor"]);
        write_csv(dir.path(), "votes.csv", &["id,bill_id"]);
        write_csv(dir.path(), "vote_results.csv", &["vote_id,legislator_id,vote_type"]);

        let settings = tally_core::settings::Settings::parse_from([
            "vote-tally",
            "--data-dir",
            dir.path().to_str().unwrap(),
        ]);
        let sources = resolve_sources(&settings).unwrap();
        assert_eq!(sources.votes.file_name().unwrap(), "votes.csv");
        assert_eq!(
            sources.vote_results.file_name().unwrap(),
            "vote_results.csv"
        );
    }

    #[test]
    fn test_resolve_sources_explicit_path_wins() {
        use clap::Parser;

        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "legislators.csv", &["id,name"]);
        write_csv(dir.path(), "bills.csv", &["id,title,Primary Sponsor"]);
        write_csv(dir.path(), "votes.csv", &["id,bill_id"]);
        write_csv(dir.path(), "vote_results.csv", &["vote_id,legislator_id,vote_type"]);
        let special = write_csv(dir.path(), "chamber.csv", &["id,name"]);

        let settings = tally_core::settings::Settings::parse_from([
            "vote-tally",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--legislators",
            special.to_str().unwrap(),
        ]);
        let sources = resolve_sources(&settings).unwrap();
        assert_eq!(sources.legislators, special);
    }

    #[test]
    fn test_resolve_sources_missing_table_fails() {
        use clap::Parser;

        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "legislators.csv", &["id,name"]);
        // No bills/votes/vote_results files.

        let settings = tally_core::settings::Settings::parse_from([
            "vote-tally",
            "--data-dir",
            dir.path().to_str().unwrap(),
        ]);
        assert!(resolve_sources(&settings).is_err());
    }

    // ── load_legislators ──────────────────────────────────────────────────────

    #[test]
    fn test_load_legislators_with_passthrough_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "legislators.csv",
            &["id,name,party,state", "7,Rep. Ada Park,D,VT", "12,Sen. Bo Reyes,R,TX"],
        );

        let table = load_legislators(&path).unwrap();
        assert_eq!(table.headers, vec!["id", "name", "party", "state"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].id, 7);
        assert_eq!(table.rows[0].name, "Rep. Ada Park");
        assert_eq!(table.rows[0].fields, vec!["7", "Rep. Ada Park", "D", "VT"]);
    }

    #[test]
    fn test_load_legislators_missing_name_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "legislators.csv", &["id,full_name", "7,Ada"]);

        let err = load_legislators(&path).unwrap_err();
        assert!(matches!(err, TallyError::MissingColumn { .. }));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_load_legislators_bad_id_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "legislators.csv", &["id,name", "seven,Ada"]);

        let err = load_legislators(&path).unwrap_err();
        assert!(matches!(err, TallyError::InvalidCell { .. }));
    }

    // ── load_bills ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_bills_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "bills.csv",
            &["id,title,Primary Sponsor", "42,Clean Water Act,7"],
        );

        let bills = load_bills(&path).unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, 42);
        assert_eq!(bills[0].title, "Clean Water Act");
        assert_eq!(bills[0].sponsor_id, Some(7));
    }

    #[test]
    fn test_load_bills_empty_sponsor_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "bills.csv",
            &["id,title,Primary Sponsor", "42,Clean Water Act,"],
        );

        let bills = load_bills(&path).unwrap();
        assert_eq!(bills[0].sponsor_id, None);
    }

    #[test]
    fn test_load_bills_non_integer_sponsor_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "bills.csv",
            &["id,title,Primary Sponsor", "42,Clean Water Act,unknown"],
        );

        let bills = load_bills(&path).unwrap();
        assert_eq!(bills[0].sponsor_id, None);
    }

    #[test]
    fn test_load_bills_missing_sponsor_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "bills.csv", &["id,title", "42,Clean Water Act"]);

        let err = load_bills(&path).unwrap_err();
        assert!(err.to_string().contains("Primary Sponsor"));
    }

    // ── load_votes / load_vote_results ────────────────────────────────────────

    #[test]
    fn test_load_votes() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "votes.csv", &["id,bill_id", "5,42", "6,43"]);

        let votes = load_votes(&path).unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].id, 5);
        assert_eq!(votes[0].bill_id, 42);
    }

    #[test]
    fn test_load_vote_results_keeps_unrecognised_codes() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vote_results.csv",
            &["vote_id,legislator_id,vote_type", "5,7,1", "5,12,2", "5,9,3"],
        );

        let results = load_vote_results(&path).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].vote_type, 3);
    }

    #[test]
    fn test_load_vote_results_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vote_results.csv",
            &["id,legislator_id,vote_type,vote_id", "1,7,1,5"],
        );

        let results = load_vote_results(&path).unwrap();
        assert_eq!(results[0].vote_id, 5);
        assert_eq!(results[0].legislator_id, 7);
        assert_eq!(results[0].vote_type, 1);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_votes(Path::new("/tmp/does-not-exist-tally-test/votes.csv")).unwrap_err();
        assert!(matches!(err, TallyError::FileRead { .. }));
    }
}
