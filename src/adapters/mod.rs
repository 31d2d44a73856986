//! Infrastructure adapters. Implement outbound ports.
//!
//! Lectionary storage, speech rendering, session persistence, console UI. Map errors to DomainError.

pub mod lectionary;
pub mod persistence;
pub mod speech;
pub mod ui;
