//! Console report layer for the vote tally.
//!
//! Renders the top-5 ranking tables shown after a run. Presentation only:
//! nothing here feeds back into the persisted summary tables.

pub mod rankings;

pub use tally_core as core;
