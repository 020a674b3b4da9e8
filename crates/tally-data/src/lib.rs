//! Data layer for the vote tally pipeline.
//!
//! Responsible for discovering and reading the four input CSV tables,
//! running the two aggregation passes and writing the summary tables back
//! to disk.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod writer;

pub use tally_core as core;
