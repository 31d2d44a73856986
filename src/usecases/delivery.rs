//! Turn-by-turn delivery of a day's readings.
//!
//! Pure: `(prior state, day) -> Turn`. The caller fetches the day and persists whatever
//! `Turn::next` says; nothing here touches I/O. Delivery is forward-only: each turn starts at the
//! cursor the previous turn wrote and ends exactly where the next one begins.

use crate::domain::{
    BreakStrength, Cursor, Day, DeliveryBudget, DomainError, GroupSize, OriginalIntent,
    SessionState, SpeechPart,
};
use crate::ports::SpeechRenderer;
use crate::usecases::day_overview::long_date;
use crate::usecases::passage_sizer::estimate_reading;
use crate::usecases::prompts::{
    CONTINUE_PROMPT, END_OF_READINGS, NEXT_READING_PROMPT, OVERSIZED_APOLOGY, READING_NOT_FOUND,
};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on rebuild-after-overflow attempts for one turn. Each attempt strictly shrinks
/// the group (at least halving it), so this is never reached before the group is one verse.
pub const MAX_REBUILD_ATTEMPTS: usize = 32;

/// Where the conversation stands after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Turn ended with a prompt; the state must be stored for the next turn.
    AwaitingContinue(SessionState),
    /// Nothing left to read; the session is cleared.
    Terminal,
}

/// Verses spoken in one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub reading_index: usize,
    pub verses: Range<usize>,
    /// The range was replaced by the oversized-unit apology.
    pub degraded: bool,
}

/// Output of one delivery turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub speech: String,
    pub next: Next,
    pub delivered: Delivered,
}

/// Delivery state machine. Cheap to clone; holds only read-only config.
#[derive(Clone)]
pub struct DeliveryEngine {
    renderer: Arc<dyn SpeechRenderer>,
    budget: DeliveryBudget,
}

impl DeliveryEngine {
    pub fn new(renderer: Arc<dyn SpeechRenderer>, budget: DeliveryBudget) -> Self {
        Self { renderer, budget }
    }

    pub fn budget(&self) -> &DeliveryBudget {
        &self.budget
    }

    /// Explicit "read the scriptures" start: announce the day, then deliver reading 0's first group.
    pub fn start(&self, day: &Day) -> Result<Turn, DomainError> {
        if day.readings.is_empty() {
            return Err(DomainError::EmptyReadingSet { date: day.date });
        }
        let lead = vec![
            SpeechPart::Paragraph(format!(
                "There are {} readings for {}.",
                day.readings.len(),
                long_date(day.date)
            )),
            SpeechPart::Break(BreakStrength::Strong),
        ];
        Ok(self.deliver(OriginalIntent::Scriptures, day, Cursor::at_reading(0), lead))
    }

    /// Continue from a stored cursor. A cursor outside the day is `MissingContext`.
    pub fn resume(&self, state: &SessionState, day: &Day) -> Result<Turn, DomainError> {
        let cursor = state.cursor;
        let Some(reading) = day.readings.get(cursor.reading_index) else {
            return Err(DomainError::MissingContext(format!(
                "reading {} out of range for {} ({} readings)",
                cursor.reading_index,
                day.date,
                day.readings.len()
            )));
        };
        if let Some(v) = cursor.verse_index {
            if v >= reading.verses.len() {
                return Err(DomainError::MissingContext(format!(
                    "verse {} out of range for reading {} ({} verses)",
                    v,
                    cursor.reading_index,
                    reading.verses.len()
                )));
            }
        }
        Ok(self.deliver(state.original_intent, day, cursor, Vec::new()))
    }

    /// Build the next slice, re-measuring the assembled payload and shrinking the group until it
    /// fits. A single verse that still overflows is replaced by the apology.
    fn deliver(
        &self,
        intent: OriginalIntent,
        day: &Day,
        cursor: Cursor,
        lead: Vec<SpeechPart>,
    ) -> Turn {
        let reading_index = cursor.reading_index;
        let reading = &day.readings[reading_index];
        let verse_count = reading.verses.len();
        let start = cursor.verse_index.unwrap_or(0);

        let planned = match cursor.group_size {
            Some(n) => GroupSize::Chunked(n),
            None => estimate_reading(reading, self.renderer.as_ref(), &self.budget),
        };
        let mut group = planned;

        for attempt in 0..MAX_REBUILD_ATTEMPTS {
            let end = (start + group.verses_per_turn(verse_count)).min(verse_count);
            let next = self.advance(intent, day, reading_index, end, group);

            let mut parts = lead.clone();
            if start == 0 {
                parts.push(SpeechPart::Paragraph(format!(
                    "The reading is from {}.",
                    self.renderer.reference_phrase(reading)
                )));
                parts.push(SpeechPart::Break(BreakStrength::Medium));
            }
            if verse_count == 0 {
                parts.push(SpeechPart::Paragraph(READING_NOT_FOUND.to_string()));
            }
            parts.extend(
                reading.verses[start..end]
                    .iter()
                    .map(|v| SpeechPart::Verse(v.content.clone())),
            );
            parts.push(SpeechPart::Break(BreakStrength::Medium));
            parts.push(SpeechPart::Paragraph(prompt_for(&next).to_string()));

            let speech = self.renderer.render(&parts);
            let length = speech.chars().count();
            if length <= self.budget.max_length {
                info!(
                    date = %day.date,
                    reading_index,
                    verses_from = start,
                    verses_to = end,
                    group_size = ?group,
                    length,
                    "delivered reading slice"
                );
                return Turn {
                    speech,
                    next,
                    delivered: Delivered {
                        reading_index,
                        verses: start..end,
                        degraded: false,
                    },
                };
            }

            let slice = end - start;
            if slice <= 1 {
                break;
            }
            // Approximate re-split measured in verses.
            let group_count = length.div_ceil(self.budget.max_length) + 1;
            let shrunk = slice.div_ceil(group_count).min(slice - 1).max(1);
            debug!(
                attempt,
                length,
                slice,
                shrunk,
                "payload over budget; shrinking group"
            );
            group = GroupSize::Chunked(shrunk);
        }

        self.degraded(intent, day, reading_index, start, planned)
    }

    /// Apologise for the verse at `start` and move past it.
    fn degraded(
        &self,
        intent: OriginalIntent,
        day: &Day,
        reading_index: usize,
        start: usize,
        planned: GroupSize,
    ) -> Turn {
        let verse_count = day.readings[reading_index].verses.len();
        let end = (start + 1).min(verse_count);
        let next = self.advance(intent, day, reading_index, end, planned);
        let err = DomainError::OversizedUnit {
            reading_index,
            verse_index: start,
            budget: self.budget.max_length,
        };
        warn!(error = %err, "speaking apology instead");
        let speech = self.renderer.render(&[
            SpeechPart::Paragraph(OVERSIZED_APOLOGY.to_string()),
            SpeechPart::Paragraph(prompt_for(&next).to_string()),
        ]);
        Turn {
            speech,
            next,
            delivered: Delivered {
                reading_index,
                verses: start..end,
                degraded: true,
            },
        }
    }

    /// Cursor after delivering up to `end` of the current reading.
    fn advance(
        &self,
        intent: OriginalIntent,
        day: &Day,
        reading_index: usize,
        end: usize,
        group: GroupSize,
    ) -> Next {
        let verse_count = day.readings[reading_index].verses.len();
        let cursor = if end < verse_count {
            Cursor {
                reading_index,
                verse_index: Some(end),
                group_size: Some(group.verses_per_turn(verse_count).max(1)),
            }
        } else if reading_index + 1 < day.readings.len() {
            Cursor::at_reading(reading_index + 1)
        } else {
            return Next::Terminal;
        };
        Next::AwaitingContinue(SessionState::new(intent, day.date, cursor))
    }
}

fn prompt_for(next: &Next) -> &'static str {
    match next {
        Next::AwaitingContinue(state) if state.cursor.verse_index.is_some() => CONTINUE_PROMPT,
        Next::AwaitingContinue(_) => NEXT_READING_PROMPT,
        Next::Terminal => END_OF_READINGS,
    }
}
