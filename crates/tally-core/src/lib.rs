//! Core domain types for the vote tally pipeline.
//!
//! Holds the table row models, the shared error type and the CLI settings
//! used by the data and report layers.

pub mod error;
pub mod models;
pub mod settings;
