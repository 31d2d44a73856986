//! Lectionary adapters. Implement LectionaryPort.

pub mod json_lectionary;
pub mod memory;
pub mod sqlite_lectionary;

pub use json_lectionary::JsonLectionary;
pub use memory::InMemoryLectionary;
pub use sqlite_lectionary::SqliteLectionary;
