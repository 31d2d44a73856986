//! Implements LectionaryPort over a SQLite lectionary via libsql.
//!
//! Three tables keyed by ISO date (`YYYY-MM-DD`): `days` holds the commemorations and fasting
//! rule, `readings` and `verses` hold the passages ordered by `ordinal`. List-valued day fields
//! (titles, feasts, saints) are stored as JSON arrays.

use crate::domain::session::DATE_FORMAT;
use crate::domain::{Day, DomainError, Reading, Verse};
use crate::ports::LectionaryPort;
use chrono::NaiveDate;
use libsql::{Database, params};
use std::path::Path;
use tracing::{debug, info};

const DAYS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS days (
    date TEXT PRIMARY KEY,
    titles_json TEXT NOT NULL DEFAULT '[]',
    fast_level INTEGER NOT NULL DEFAULT 0,
    fast_level_desc TEXT NOT NULL DEFAULT '',
    fast_exception_desc TEXT NOT NULL DEFAULT '',
    feasts_json TEXT NOT NULL DEFAULT '[]',
    saints_json TEXT NOT NULL DEFAULT '[]'
)"#;

const READINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS readings (
    date TEXT NOT NULL,
    ordinal INTEGER NOT NULL,
    book TEXT NOT NULL,
    display TEXT NOT NULL,
    PRIMARY KEY (date, ordinal)
)"#;

const VERSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS verses (
    date TEXT NOT NULL,
    reading_ordinal INTEGER NOT NULL,
    ordinal INTEGER NOT NULL,
    content TEXT NOT NULL,
    PRIMARY KEY (date, reading_ordinal, ordinal)
)"#;

fn db_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Lectionary(e.to_string())
}

fn json_list(raw: &str) -> Result<Vec<String>, DomainError> {
    serde_json::from_str(raw).map_err(|e| DomainError::Lectionary(format!("bad list column: {}", e)))
}

/// SQLite lectionary. Safe to share via Arc; each query opens its own connection.
pub struct SqliteLectionary {
    db: Database,
}

impl SqliteLectionary {
    /// Open (or create) the database file and ensure the schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(db_err)?;
        }
        let path_str = path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(db_err)?;
        let conn = db.connect().map_err(db_err)?;
        for ddl in [DAYS_TABLE, READINGS_TABLE, VERSES_TABLE] {
            conn.execute(ddl, ()).await.map_err(db_err)?;
        }
        info!(path = %path.display(), "lectionary database ready");
        Ok(Self { db })
    }

    /// Insert or replace one day with all of its readings and verses.
    pub async fn put_day(&self, day: &Day) -> Result<(), DomainError> {
        let date = day.date.format(DATE_FORMAT).to_string();
        let to_json = |v: &Vec<String>| serde_json::to_string(v).map_err(db_err);

        let conn = self.db.connect().map_err(db_err)?;
        let tx = conn.transaction().await.map_err(db_err)?;
        tx.execute("DELETE FROM verses WHERE date = ?1", params![date.as_str()])
            .await
            .map_err(db_err)?;
        tx.execute("DELETE FROM readings WHERE date = ?1", params![date.as_str()])
            .await
            .map_err(db_err)?;
        tx.execute(
            r#"
            INSERT OR REPLACE INTO days
                (date, titles_json, fast_level, fast_level_desc, fast_exception_desc, feasts_json, saints_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                date.as_str(),
                to_json(&day.titles)?,
                day.fast_level as i64,
                day.fast_level_desc.as_str(),
                day.fast_exception_desc.as_str(),
                to_json(&day.feasts)?,
                to_json(&day.saints)?
            ],
        )
        .await
        .map_err(db_err)?;

        for (r, reading) in day.readings.iter().enumerate() {
            tx.execute(
                "INSERT INTO readings (date, ordinal, book, display) VALUES (?1, ?2, ?3, ?4)",
                params![
                    date.as_str(),
                    r as i64,
                    reading.book.as_str(),
                    reading.display.as_str()
                ],
            )
            .await
            .map_err(db_err)?;
            for (v, verse) in reading.verses.iter().enumerate() {
                tx.execute(
                    "INSERT INTO verses (date, reading_ordinal, ordinal, content) VALUES (?1, ?2, ?3, ?4)",
                    params![date.as_str(), r as i64, v as i64, verse.content.as_str()],
                )
                .await
                .map_err(db_err)?;
            }
        }
        tx.commit().await.map_err(db_err)?;
        debug!(date = %day.date, readings = day.readings.len(), "stored lectionary day");
        Ok(())
    }

    async fn load_readings(
        &self,
        conn: &libsql::Connection,
        date: &str,
    ) -> Result<Vec<Reading>, DomainError> {
        let mut rows = conn
            .query(
                "SELECT ordinal, book, display FROM readings WHERE date = ?1 ORDER BY ordinal",
                params![date],
            )
            .await
            .map_err(db_err)?;
        let mut readings = Vec::new();
        let mut ordinals = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err)? {
            ordinals.push(row.get::<i64>(0).map_err(db_err)?);
            readings.push(Reading {
                book: row.get::<String>(1).map_err(db_err)?,
                display: row.get::<String>(2).map_err(db_err)?,
                verses: Vec::new(),
            });
        }

        for (reading, ordinal) in readings.iter_mut().zip(ordinals) {
            let mut rows = conn
                .query(
                    r#"
                    SELECT content FROM verses
                    WHERE date = ?1 AND reading_ordinal = ?2
                    ORDER BY ordinal
                    "#,
                    params![date, ordinal],
                )
                .await
                .map_err(db_err)?;
            while let Some(row) = rows.next().await.map_err(db_err)? {
                reading
                    .verses
                    .push(Verse::new(row.get::<String>(0).map_err(db_err)?));
            }
        }
        Ok(readings)
    }
}

#[async_trait::async_trait]
impl LectionaryPort for SqliteLectionary {
    async fn get_day(&self, date: NaiveDate) -> Result<Day, DomainError> {
        let key = date.format(DATE_FORMAT).to_string();
        let conn = self.db.connect().map_err(db_err)?;
        let mut rows = conn
            .query(
                r#"
                SELECT titles_json, fast_level, fast_level_desc, fast_exception_desc, feasts_json, saints_json
                FROM days WHERE date = ?1
                "#,
                params![key.as_str()],
            )
            .await
            .map_err(db_err)?;

        let Some(row) = rows.next().await.map_err(db_err)? else {
            debug!(date = %date, "date not in lectionary");
            return Ok(Day::empty(date));
        };
        let fast_level: i64 = row.get(1).map_err(db_err)?;
        let mut day = Day {
            date,
            titles: json_list(&row.get::<String>(0).map_err(db_err)?)?,
            fast_level: u8::try_from(fast_level).map_err(db_err)?,
            fast_level_desc: row.get::<String>(2).unwrap_or_default(),
            fast_exception_desc: row.get::<String>(3).unwrap_or_default(),
            feasts: json_list(&row.get::<String>(4).map_err(db_err)?)?,
            saints: json_list(&row.get::<String>(5).map_err(db_err)?)?,
            readings: Vec::new(),
        };
        day.readings = self.load_readings(&conn, &key).await?;
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day() -> Day {
        let mut day = Day::empty(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        day.titles = vec!["Tuesday of the Third Week of Lent".to_string()];
        day.fast_level = 2;
        day.fast_level_desc = "Great Lent".to_string();
        day.saints = vec!["St Conon".to_string(), "St Mark the Ascetic".to_string()];
        day.readings = vec![
            Reading {
                book: "OT".to_string(),
                display: "Isaiah 9.9-10.4".to_string(),
                verses: vec![Verse::new("The bricks are fallen down"), Verse::new("Therefore")],
            },
            Reading {
                book: "Vespers".to_string(),
                display: "Prov 10.1-22".to_string(),
                verses: Vec::new(),
            },
            Reading {
                book: "Matthew".to_string(),
                display: "Matt 5.1-12".to_string(),
                verses: vec![Verse::new("Blessed are the poor in spirit")],
            },
        ];
        day
    }

    #[tokio::test]
    async fn test_put_then_get_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = SqliteLectionary::connect(dir.path().join("lectionary.db"))
            .await
            .unwrap();
        let day = sample_day();
        db.put_day(&day).await.unwrap();
        assert_eq!(db.get_day(day.date).await.unwrap(), day);
    }

    #[tokio::test]
    async fn test_put_day_replaces_previous_readings() {
        let dir = tempfile::tempdir().unwrap();
        let db = SqliteLectionary::connect(dir.path().join("lectionary.db"))
            .await
            .unwrap();
        let mut day = sample_day();
        db.put_day(&day).await.unwrap();
        day.readings.truncate(1);
        db.put_day(&day).await.unwrap();
        assert_eq!(db.get_day(day.date).await.unwrap().readings.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_date_is_empty_day() {
        let dir = tempfile::tempdir().unwrap();
        let db = SqliteLectionary::connect(dir.path().join("nested/lectionary.db"))
            .await
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(db.get_day(date).await.unwrap(), Day::empty(date));
    }
}
