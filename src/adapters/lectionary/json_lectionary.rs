//! Implements LectionaryPort over a directory of JSON files.
//! One file per day: {dir}/{YYYY-MM-DD}.json, holding a serialized `Day`.

use crate::domain::session::DATE_FORMAT;
use crate::domain::{Day, DomainError};
use crate::ports::LectionaryPort;
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory-backed lectionary. Files are read on every lookup.
pub struct JsonLectionary {
    base_dir: PathBuf,
}

impl JsonLectionary {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", date.format(DATE_FORMAT)))
    }
}

#[async_trait::async_trait]
impl LectionaryPort for JsonLectionary {
    async fn get_day(&self, date: NaiveDate) -> Result<Day, DomainError> {
        let path = self.day_path(date);
        let raw = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no lectionary file for date");
                return Ok(Day::empty(date));
            }
            Err(e) => {
                return Err(DomainError::Lectionary(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        let day: Day = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Lectionary(format!("parse {}: {}", path.display(), e)))?;
        if day.date != date {
            return Err(DomainError::Lectionary(format!(
                "{} holds {} instead of {}",
                path.display(),
                day.date,
                date
            )));
        }
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_day_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("2024-03-05.json"),
            r#"{
                "date": "2024-03-05",
                "titles": ["Tuesday of the Third Week of Lent"],
                "fast_level": 2,
                "fast_level_desc": "Great Lent",
                "readings": [
                    {"book": "Matthew", "display": "Matt 5.1-12",
                     "verses": [{"content": "Blessed are the poor in spirit"}]}
                ]
            }"#,
        )
        .unwrap();

        let lectionary = JsonLectionary::new(dir.path());
        let day = lectionary
            .get_day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .await
            .unwrap();
        assert_eq!(day.fast_level, 2);
        assert!(day.feasts.is_empty());
        assert_eq!(day.readings[0].verses.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_day() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let day = JsonLectionary::new(dir.path()).get_day(date).await.unwrap();
        assert_eq!(day, Day::empty(date));
    }

    #[tokio::test]
    async fn test_malformed_or_mismatched_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2024-03-07.json"), "{ not json").unwrap();
        std::fs::write(
            dir.path().join("2024-03-08.json"),
            r#"{"date": "2024-03-09"}"#,
        )
        .unwrap();
        let lectionary = JsonLectionary::new(dir.path());
        for d in [7, 8] {
            let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
            assert!(matches!(
                lectionary.get_day(date).await,
                Err(DomainError::Lectionary(_))
            ));
        }
    }
}
