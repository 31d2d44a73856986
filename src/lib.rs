//! daily-readings: Voice delivery of the day's scripture readings with Hexagonal Architecture.
//!
//! Long readings are split into turns that each fit the host's speech limit; the position is
//! carried in the host's session bag between turns.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
