//! Session cursor carried between turns by the host platform.
//!
//! The host hands us a string-keyed bag of primitive values on every turn and stores whatever we
//! hand back. `SessionState` is the typed view of that bag; anything absent or wrong-typed is
//! `MissingContext`, never a panic.

use super::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const KEY_ORIGINAL_INTENT: &str = "original_intent";
pub const KEY_DATE: &str = "date";
pub const KEY_NEXT_READING: &str = "next_reading";
pub const KEY_NEXT_VERSE: &str = "next_verse";
pub const KEY_GROUP_SIZE: &str = "group_size";

/// Date format used both for slots and for the stored session date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque key-value bag supplied and stored by the host platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBag(BTreeMap<String, Value>);

impl SessionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every key the delivery engine tracks. Unrelated host keys survive.
    pub fn clear_tracking(&mut self) {
        for key in [
            KEY_ORIGINAL_INTENT,
            KEY_DATE,
            KEY_NEXT_READING,
            KEY_NEXT_VERSE,
            KEY_GROUP_SIZE,
        ] {
            self.0.remove(key);
        }
    }
}

/// Which entry point started the reading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginalIntent {
    Launch,
    Scriptures,
}

impl OriginalIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launch => "Launch",
            Self::Scriptures => "Scriptures",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Launch" => Some(Self::Launch),
            "Scriptures" => Some(Self::Scriptures),
            _ => None,
        }
    }
}

/// Position within a day's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub reading_index: usize,
    /// Offset of the next verse to deliver; `None` = start of the reading.
    pub verse_index: Option<usize>,
    /// Verses per turn for the current reading; `None` = the reading fits whole.
    pub group_size: Option<usize>,
}

impl Cursor {
    pub fn at_reading(reading_index: usize) -> Self {
        Self {
            reading_index,
            verse_index: None,
            group_size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub original_intent: OriginalIntent,
    pub date: NaiveDate,
    pub cursor: Cursor,
}

impl SessionState {
    pub fn new(original_intent: OriginalIntent, date: NaiveDate, cursor: Cursor) -> Self {
        Self {
            original_intent,
            date,
            cursor,
        }
    }

    /// Validate the host bag into a typed state.
    ///
    /// `next_reading` defaults to 0 when absent; `next_verse`/`group_size` stay optional.
    pub fn from_bag(bag: &SessionBag) -> Result<Self, DomainError> {
        let original_intent = bag
            .get(KEY_ORIGINAL_INTENT)
            .and_then(Value::as_str)
            .and_then(OriginalIntent::parse)
            .ok_or_else(|| missing(KEY_ORIGINAL_INTENT))?;

        let date = bag
            .get(KEY_DATE)
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            .ok_or_else(|| missing(KEY_DATE))?;

        let reading_index = optional_index(bag, KEY_NEXT_READING)?.unwrap_or(0);
        let verse_index = optional_index(bag, KEY_NEXT_VERSE)?;
        let group_size = match optional_index(bag, KEY_GROUP_SIZE)? {
            Some(0) => return Err(missing(KEY_GROUP_SIZE)),
            other => other,
        };

        Ok(Self {
            original_intent,
            date,
            cursor: Cursor {
                reading_index,
                verse_index,
                group_size,
            },
        })
    }

    /// Write this state into the bag, deleting optional keys that are no longer tracked.
    pub fn write_to(&self, bag: &mut SessionBag) {
        bag.insert(KEY_ORIGINAL_INTENT, self.original_intent.as_str());
        bag.insert(KEY_DATE, self.date.format(DATE_FORMAT).to_string());
        bag.insert(KEY_NEXT_READING, self.cursor.reading_index as u64);
        match self.cursor.verse_index {
            Some(v) => bag.insert(KEY_NEXT_VERSE, v as u64),
            None => bag.remove(KEY_NEXT_VERSE),
        }
        match self.cursor.group_size {
            Some(g) => bag.insert(KEY_GROUP_SIZE, g as u64),
            None => bag.remove(KEY_GROUP_SIZE),
        }
    }
}

fn missing(key: &str) -> DomainError {
    DomainError::MissingContext(format!("session field '{}' absent or malformed", key))
}

/// Hosts round-trip numbers through JSON doubles, so accept integral floats too.
fn optional_index(bag: &SessionBag, key: &str) -> Result<Option<usize>, DomainError> {
    let Some(value) = bag.get(key) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).map(Some).map_err(|_| missing(key));
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Ok(Some(f as usize))
        }
        _ => Err(missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> SessionBag {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_bag_full() {
        let b = bag(json!({
            "original_intent": "Scriptures",
            "date": "2024-03-05",
            "next_reading": 1.0,
            "next_verse": 6,
            "group_size": 6
        }));
        let state = SessionState::from_bag(&b).unwrap();
        assert_eq!(state.original_intent, OriginalIntent::Scriptures);
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(
            state.cursor,
            Cursor {
                reading_index: 1,
                verse_index: Some(6),
                group_size: Some(6)
            }
        );
    }

    #[test]
    fn test_from_bag_defaults_reading_index() {
        let b = bag(json!({"original_intent": "Launch", "date": "2024-03-05"}));
        let state = SessionState::from_bag(&b).unwrap();
        assert_eq!(state.cursor, Cursor::at_reading(0));
    }

    #[test]
    fn test_missing_date_is_missing_context() {
        let b = bag(json!({"original_intent": "Launch", "next_reading": 0}));
        assert!(matches!(
            SessionState::from_bag(&b),
            Err(DomainError::MissingContext(_))
        ));
    }

    #[test]
    fn test_wrong_types_are_missing_context() {
        for b in [
            json!({"original_intent": "Day", "date": "2024-03-05"}),
            json!({"original_intent": "Launch", "date": 20240305}),
            json!({"original_intent": "Launch", "date": "2024-03-05", "next_reading": "one"}),
            json!({"original_intent": "Launch", "date": "2024-03-05", "next_verse": -1}),
            json!({"original_intent": "Launch", "date": "2024-03-05", "next_verse": 1.5}),
            json!({"original_intent": "Launch", "date": "2024-03-05", "group_size": 0}),
        ] {
            assert!(
                matches!(
                    SessionState::from_bag(&bag(b.clone())),
                    Err(DomainError::MissingContext(_))
                ),
                "expected MissingContext for {}",
                b
            );
        }
    }

    #[test]
    fn test_write_to_removes_untracked_keys() {
        let mut b = bag(json!({"next_verse": 4, "group_size": 4, "host_key": "kept"}));
        let state = SessionState::new(
            OriginalIntent::Launch,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            Cursor::at_reading(2),
        );
        state.write_to(&mut b);
        assert_eq!(b.get(KEY_NEXT_READING), Some(&json!(2)));
        assert_eq!(b.get(KEY_DATE), Some(&json!("2024-03-05")));
        assert!(b.get(KEY_NEXT_VERSE).is_none());
        assert!(b.get(KEY_GROUP_SIZE).is_none());
        assert_eq!(b.get("host_key"), Some(&json!("kept")));

        b.clear_tracking();
        assert_eq!(b, bag(json!({"host_key": "kept"})));
    }
}
