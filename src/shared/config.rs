//! Application configuration. Speech budget, time zone, data paths.

use crate::domain::DeliveryBudget;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::PathBuf;

/// Default session file for the console host.
pub const DEFAULT_SESSION_PATH: &str = "./data/session.json";

/// Home time zone of the skill (US Pacific, standard time).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -8;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Hard cap on one spoken response, in characters. Read from DAILY_READINGS_MAX_SPEECH_LENGTH.
    #[serde(default)]
    pub max_speech_length: Option<usize>,

    /// Markup added around each verse (`<p></p>`).
    #[serde(default)]
    pub verse_overhead: Option<usize>,

    /// Fixed text added to the first group of a reading.
    #[serde(default)]
    pub preamble_length: Option<usize>,

    /// Fixed text added to the last group of a reading.
    #[serde(default)]
    pub closing_length: Option<usize>,

    /// Fixed text added to every other group.
    #[serde(default)]
    pub continuation_length: Option<usize>,

    /// Offset used to decide what "today" is. Read from DAILY_READINGS_UTC_OFFSET_HOURS.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,

    /// SQLite lectionary file. Takes precedence over `lectionary_dir`.
    #[serde(default)]
    pub lectionary_db: Option<String>,

    /// Directory of per-day JSON files.
    #[serde(default)]
    pub lectionary_dir: Option<String>,

    #[serde(default)]
    pub session_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("DAILY_READINGS"));
        if let Ok(path) = std::env::var("DAILY_READINGS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn max_speech_length_or_default(&self) -> usize {
        self.max_speech_length
            .unwrap_or(DeliveryBudget::default().max_length)
    }

    pub fn verse_overhead_or_default(&self) -> usize {
        self.verse_overhead
            .unwrap_or(DeliveryBudget::default().verse_overhead)
    }

    pub fn preamble_length_or_default(&self) -> usize {
        self.preamble_length
            .unwrap_or(DeliveryBudget::default().preamble)
    }

    pub fn closing_length_or_default(&self) -> usize {
        self.closing_length
            .unwrap_or(DeliveryBudget::default().closing)
    }

    pub fn continuation_length_or_default(&self) -> usize {
        self.continuation_length
            .unwrap_or(DeliveryBudget::default().continuation)
    }

    /// Returns the local offset. Out-of-range hours fall back to the default.
    pub fn utc_offset_or_default(&self) -> FixedOffset {
        let hours = self.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS);
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .or_else(|| FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600))
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn session_path_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.session_path
                .as_deref()
                .unwrap_or(DEFAULT_SESSION_PATH),
        )
    }

    /// Budget assembled from the configured lengths.
    pub fn delivery_budget(&self) -> DeliveryBudget {
        DeliveryBudget {
            max_length: self.max_speech_length_or_default(),
            verse_overhead: self.verse_overhead_or_default(),
            preamble: self.preamble_length_or_default(),
            closing: self.closing_length_or_default(),
            continuation: self.continuation_length_or_default(),
        }
    }
}
