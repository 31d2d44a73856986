//! Spoken and card summary of a day: commemorations, fasting rule, readings list.

use crate::domain::{Day, SpeechPart};
use chrono::NaiveDate;

/// Speech parts plus card text describing one day.
#[derive(Debug, Clone)]
pub struct DayOverview {
    /// "Today, January 2" / "Tomorrow, January 2" / "Monday, January 2".
    pub when: String,
    pub parts: Vec<SpeechPart>,
    pub card: String,
}

pub fn day_overview(day: &Day, today: NaiveDate) -> DayOverview {
    let when = when_phrase(day.date, today);

    let feasts = match day.feasts.as_slice() {
        [] => String::new(),
        [one] => format!("The feast of {} is celebrated.", one),
        many => format!("The feasts celebrated are: {}.", human_join(many)),
    };
    let saints = match day.saints.as_slice() {
        [] => String::new(),
        [one] => format!("The commemoration is for {}.", one),
        many => format!("The commemorations are for {}.", human_join(many)),
    };

    let mut card = String::new();
    if let Some(title) = day.titles.first() {
        card.push_str(&format!("{}, is the {}.\n\n", when, title));
    }
    if day.fast_exception_desc.is_empty() {
        card.push_str(&format!("{}\n\n", day.fast_level_desc));
    } else {
        card.push_str(&format!(
            "{} \u{2013} {}\n\n",
            day.fast_level_desc, day.fast_exception_desc
        ));
    }
    for text in [&feasts, &saints] {
        if !text.is_empty() {
            card.push_str(text);
            card.push_str("\n\n");
        }
    }
    for reading in &day.readings {
        card.push_str(&reading.display);
        card.push('\n');
    }

    let mut parts = Vec::new();
    if let Some(title) = day.titles.first() {
        parts.push(SpeechPart::Paragraph(format!("{}, is the {}.", when, title)));
    }
    parts.push(SpeechPart::Paragraph(fasting_phrase(day)));
    parts.push(SpeechPart::Paragraph(feasts));
    parts.push(SpeechPart::Paragraph(saints.replace(
        "Ven.",
        r#"<sub alias="The Venerable">Ven.</sub>"#,
    )));

    DayOverview { when, parts, card }
}

/// Date phrased relative to `today`.
pub fn when_phrase(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => format!("Today, {}", date.format("%B %-d")),
        1 => format!("Tomorrow, {}", date.format("%B %-d")),
        _ => long_date(date),
    }
}

/// "Monday, January 2".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

pub fn fasting_phrase(day: &Day) -> String {
    let exception = &day.fast_exception_desc;
    match day.fast_level {
        0 => "On this day there is no fast.".to_string(),
        // Normal weekly fast
        1 if exception.is_empty() => "On this day there is a fast.".to_string(),
        1 => format!("On this day there is a fast. {}.", exception),
        // One of the four great fasts
        _ if exception.is_empty() => format!("This day is during the {}.", day.fast_level_desc),
        _ => format!(
            "This day is during the {}. {}.",
            day.fast_level_desc, exception
        ),
    }
}

/// "a", "a and b", "a, b and c".
pub fn human_join(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Reading;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_day() -> Day {
        let mut day = Day::empty(date(2019, 2, 11));
        day.titles = vec!["Thirty-Sixth Week after Pentecost".to_string()];
        day.fast_level = 1;
        day.fast_level_desc = "Fast".to_string();
        day.fast_exception_desc = "Fish, Wine and Oil are Allowed".to_string();
        day.feasts = vec!["St Blaise".to_string()];
        day.saints = vec!["Ven. Theodora".to_string(), "St Meletius".to_string()];
        day.readings = vec![Reading {
            book: "Apostol".to_string(),
            display: "James 2.14-26".to_string(),
            verses: Vec::new(),
        }];
        day
    }

    #[test]
    fn test_when_phrase() {
        let today = date(2024, 1, 2);
        assert_eq!(when_phrase(today, today), "Today, January 2");
        assert_eq!(when_phrase(date(2024, 1, 3), today), "Tomorrow, January 3");
        assert_eq!(when_phrase(date(2024, 1, 1), today), "Monday, January 1");
        assert_eq!(when_phrase(date(2024, 1, 9), today), "Tuesday, January 9");
    }

    #[test]
    fn test_human_join() {
        let w = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(human_join(&w(&["a"])), "a");
        assert_eq!(human_join(&w(&["a", "b"])), "a and b");
        assert_eq!(human_join(&w(&["a", "b", "c"])), "a, b and c");
    }

    #[test]
    fn test_fasting_phrase() {
        let mut day = Day::empty(date(2024, 1, 2));
        assert_eq!(fasting_phrase(&day), "On this day there is no fast.");
        day.fast_level = 1;
        assert_eq!(fasting_phrase(&day), "On this day there is a fast.");
        day.fast_level = 3;
        day.fast_level_desc = "Nativity Fast".to_string();
        day.fast_exception_desc = "Fish Allowed".to_string();
        assert_eq!(
            fasting_phrase(&day),
            "This day is during the Nativity Fast. Fish Allowed."
        );
    }

    #[test]
    fn test_overview_speech_and_card() {
        let day = sample_day();
        let overview = day_overview(&day, date(2019, 2, 11));
        assert_eq!(overview.when, "Today, February 11");
        assert_eq!(
            overview.parts[0],
            SpeechPart::Paragraph(
                "Today, February 11, is the Thirty-Sixth Week after Pentecost.".to_string()
            )
        );
        assert_eq!(
            overview.parts[3],
            SpeechPart::Paragraph(
                r#"The commemorations are for <sub alias="The Venerable">Ven.</sub> Theodora and St Meletius."#
                    .to_string()
            )
        );
        assert!(overview.card.contains("Fast \u{2013} Fish, Wine and Oil are Allowed"));
        assert!(overview.card.contains("The feast of St Blaise is celebrated."));
        assert!(overview.card.ends_with("James 2.14-26\n"));
    }

    #[test]
    fn test_overview_without_titles_starts_with_fasting() {
        let mut day = sample_day();
        day.titles.clear();
        day.fast_level_desc = "No Fast".to_string();
        day.fast_exception_desc.clear();
        let overview = day_overview(&day, date(2019, 2, 11));
        assert!(overview.card.starts_with("No Fast"));
    }
}
