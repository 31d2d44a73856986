//! Persistence adapters for state that lives between turns.

pub mod session_json;

pub use session_json::SessionJson;
