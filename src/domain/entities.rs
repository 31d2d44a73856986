//! Domain entities. Pure data structures for the core business.
//!
//! No SQL/SSML types here; adapters map into these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One liturgical day: its commemorations, fasting rule and ordered scripture readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub fast_level: u8,
    #[serde(default)]
    pub fast_level_desc: String,
    #[serde(default)]
    pub fast_exception_desc: String,
    #[serde(default)]
    pub feasts: Vec<String>,
    #[serde(default)]
    pub saints: Vec<String>,
    #[serde(default)]
    pub readings: Vec<Reading>,
}

impl Day {
    /// A day the lectionary knows nothing about.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            titles: Vec::new(),
            fast_level: 0,
            fast_level_desc: String::new(),
            fast_exception_desc: String::new(),
            feasts: Vec::new(),
            saints: Vec::new(),
            readings: Vec::new(),
        }
    }

    /// Total verses across all readings.
    pub fn verse_count(&self) -> usize {
        self.readings.iter().map(|r| r.verses.len()).sum()
    }
}

/// A scripture passage assigned to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Liturgical book the passage is read from ("Matthew", "Apostol", "OT", ...).
    pub book: String,
    /// Human-readable citation, e.g. "Matt 22.15-23.39".
    pub display: String,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl Reading {
    pub fn category(&self) -> ReadingCategory {
        ReadingCategory::from_liturgical_book(&self.book)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingCategory {
    Gospel,
    Epistle,
    OldTestament,
    Other,
}

impl ReadingCategory {
    pub fn from_liturgical_book(book: &str) -> Self {
        match book.to_lowercase().as_str() {
            "matthew" | "mark" | "luke" | "john" => Self::Gospel,
            "apostol" => Self::Epistle,
            "ot" => Self::OldTestament,
            _ => Self::Other,
        }
    }
}

/// A single verse. `content` may carry inline emphasis markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub content: String,
}

impl Verse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
