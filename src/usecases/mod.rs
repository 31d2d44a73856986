//! Application use cases. Orchestrate domain logic via ports.

pub mod day_overview;
pub mod delivery;
pub mod passage_sizer;
pub mod prompts;
pub mod turn_service;

pub use delivery::{Delivered, DeliveryEngine, Next, Turn};
pub use passage_sizer::{estimate_group_size, estimate_reading};
pub use turn_service::TurnService;
