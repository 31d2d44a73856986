//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod budget;
pub mod entities;
pub mod errors;
pub mod session;
pub mod speech;
pub mod turn;

pub use budget::{DeliveryBudget, GroupSize};
pub use entities::{Day, Reading, ReadingCategory, Verse};
pub use errors::DomainError;
pub use session::{Cursor, OriginalIntent, SessionBag, SessionState};
pub use speech::{BreakStrength, SpeechPart};
pub use turn::{Card, Intent, TurnRequest, TurnResponse};
