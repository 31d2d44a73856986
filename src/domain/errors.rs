//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Date slot (or stored date) could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Continue signal without a usable session.
    #[error("Missing session context: {0}")]
    MissingContext(String),

    #[error("No readings for {date}")]
    EmptyReadingSet { date: NaiveDate },

    /// A single verse exceeds the speech budget even on its own.
    #[error("Reading {reading_index} verse {verse_index} does not fit in {budget} characters")]
    OversizedUnit {
        reading_index: usize,
        verse_index: usize,
        budget: usize,
    },

    #[error("Lectionary error: {0}")]
    Lectionary(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Input error: {0}")]
    Input(String),
}
