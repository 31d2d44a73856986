//! In-memory lectionary for tests and demos.

use crate::domain::{Day, DomainError};
use crate::ports::LectionaryPort;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct InMemoryLectionary {
    days: HashMap<NaiveDate, Day>,
}

impl InMemoryLectionary {
    pub fn new(days: impl IntoIterator<Item = Day>) -> Self {
        Self {
            days: days.into_iter().map(|d| (d.date, d)).collect(),
        }
    }
}

#[async_trait::async_trait]
impl LectionaryPort for InMemoryLectionary {
    async fn get_day(&self, date: NaiveDate) -> Result<Day, DomainError> {
        Ok(self
            .days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| Day::empty(date)))
    }
}
