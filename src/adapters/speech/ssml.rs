//! Implements SpeechRenderer with SSML for voice platforms.
//!
//! Verse markup is stripped before wrapping each verse in `<p></p>`; lengths are counted in
//! characters, which is what the platform's payload limit counts.

use crate::domain::{Reading, ReadingCategory, SpeechPart, Verse};
use crate::ports::SpeechRenderer;
use regex::Regex;
use std::sync::LazyLock;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("markup regex"));

/// (ordinal number) (book) (chapter), e.g. "2 Thess 3.6-18" or "Matt 22.15-23.39".
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*)\s*([\w\s]+)\s+(\d+)").expect("reference regex"));

/// Spoken epistle names. `{n}` is replaced by the ordinal hint, or dropped when there is none.
const EPISTLES: &[(&str, &str)] = &[
    ("acts", "The Acts of the Apostles"),
    ("romans", "Saint Paul's letter to the Romans"),
    ("corinthians", "Saint Paul's {n} letter to the Corinthians"),
    ("galatians", "Saint Paul's letter to the Galatians"),
    ("ephesians", "Saint Paul's letter to the Ephesians"),
    ("philippians", "Saint Paul's letter to the Philippians"),
    ("colossians", "Saint Paul's letter to the Colossians"),
    ("thessalonians", "Saint Paul's {n} letter to the Thessalonians"),
    ("timothy", "Saint Paul's {n} letter to Timothy"),
    ("titus", "Saint Paul's letter to Titus"),
    ("philemon", "Saint Paul's letter to Philemon"),
    ("hebrews", "Saint Paul's letter to the Hebrews"),
    ("james", "The Catholic letter of Saint James"),
    ("peter", "The {n} Catholic letter of Saint Peter"),
    ("john", "The {n} Catholic letter of Saint John"),
    ("jude", "The Catholic letter of Saint Jude"),
];

/// Remove inline markup tags, keeping the text between them.
pub fn strip_markup(text: &str) -> String {
    MARKUP_RE.replace_all(text, "").into_owned()
}

fn ordinal(number: &str) -> String {
    format!(r#"<say-as interpret-as="ordinal">{}</say-as>"#, number)
}

/// Incremental SSML document. Empty paragraphs are skipped.
#[derive(Debug, Default)]
pub struct SsmlBuilder {
    buffer: String,
}

impl SsmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_paragraph(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.buffer.push_str("<p>");
            self.buffer.push_str(text);
            self.buffer.push_str("</p>");
        }
        self
    }

    pub fn append_break(&mut self, strength: &str, time: &str) -> &mut Self {
        self.buffer.push_str(&format!(
            r#"<break strength="{}" time="{}"/>"#,
            strength, time
        ));
        self
    }

    pub fn build(&self) -> String {
        format!("<speak>{}</speak>", self.buffer)
    }
}

/// SSML renderer. Stateless; share via Arc.
#[derive(Debug, Default, Clone, Copy)]
pub struct SsmlRenderer;

impl SsmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechRenderer for SsmlRenderer {
    fn verse_length(&self, verse: &Verse) -> usize {
        strip_markup(&verse.content).chars().count()
    }

    fn reference_phrase(&self, reading: &Reading) -> String {
        let fallback = || reading.display.replace('.', ":");
        let Some(caps) = REFERENCE_RE.captures(&reading.display) else {
            // Irregular reference; let the voice do the best it can.
            return fallback();
        };
        let number = caps.get(1).map_or("", |m| m.as_str());
        let book = caps.get(2).map_or("", |m| m.as_str()).trim();
        let chapter = caps.get(3).map_or("", |m| m.as_str());

        match reading.category() {
            ReadingCategory::Gospel => format!(
                "The Holy Gospel according to Saint {}, chapter {}",
                book, chapter
            ),
            ReadingCategory::Epistle => {
                let key = book.to_lowercase();
                match EPISTLES.iter().find(|(k, _)| *k == key) {
                    Some((_, name)) if number.is_empty() => {
                        format!("{}, chapter {}", name.replace("{n} ", ""), chapter)
                    }
                    Some((_, name)) => {
                        format!("{}, chapter {}", name.replace("{n}", &ordinal(number)), chapter)
                    }
                    None => format!("{}, chapter {}", book, chapter),
                }
            }
            ReadingCategory::OldTestament if !number.is_empty() => {
                format!("{} {}, chapter {}", ordinal(number), book, chapter)
            }
            ReadingCategory::OldTestament => format!("{}, chapter {}", book, chapter),
            ReadingCategory::Other => fallback(),
        }
    }

    fn render(&self, parts: &[SpeechPart]) -> String {
        let mut builder = SsmlBuilder::new();
        for part in parts {
            match part {
                SpeechPart::Paragraph(text) => {
                    builder.append_paragraph(text);
                }
                SpeechPart::Verse(content) => {
                    builder.append_paragraph(&strip_markup(content));
                }
                SpeechPart::Break(strength) => {
                    builder.append_break(strength.as_str(), strength.time());
                }
            }
        }
        builder.build()
    }

    fn plain_text(&self, markup: &str) -> String {
        strip_markup(markup).trim().to_string()
    }
}
