//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Day, DomainError, Reading, SessionBag, SpeechPart, Verse};
use chrono::NaiveDate;

/// Lectionary collaborator. Computes (or looks up) a liturgical day.
#[async_trait::async_trait]
pub trait LectionaryPort: Send + Sync {
    /// Day for `date`, readings in liturgical order. A date the lectionary has nothing for
    /// yields a `Day` with no readings, not an error.
    async fn get_day(&self, date: NaiveDate) -> Result<Day, DomainError>;
}

/// Speech renderer. Pure formatting with measurable output.
pub trait SpeechRenderer: Send + Sync {
    /// Rendered length of one verse's text, wrapper excluded.
    fn verse_length(&self, verse: &Verse) -> usize;

    /// Spoken form of a reading's citation ("The Holy Gospel according to Saint Matthew, chapter 22").
    fn reference_phrase(&self, reading: &Reading) -> String;

    /// Assemble a full turn payload.
    fn render(&self, parts: &[SpeechPart]) -> String;

    /// Plain text for display cards (markup removed).
    fn plain_text(&self, markup: &str) -> String;
}

/// Session bag storage for hosts that do not carry the bag themselves (e.g. the console).
#[async_trait::async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load the stored bag; an empty bag if nothing was stored yet.
    async fn load(&self) -> Result<SessionBag, DomainError>;

    /// Replace the stored bag.
    async fn save(&self, bag: &SessionBag) -> Result<(), DomainError>;
}
