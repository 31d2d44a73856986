//! One conversational turn: what the host sends in and what we hand back.

use super::session::SessionBag;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User signal, parsed from the platform's intent name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Launch,
    Day,
    Scriptures,
    Yes,
    Next,
    No,
    Help,
    Stop,
    Cancel,
    Unknown(String),
}

impl Intent {
    pub fn name(&self) -> &str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Day => "Day",
            Self::Scriptures => "Scriptures",
            Self::Yes => "AMAZON.YesIntent",
            Self::Next => "AMAZON.NextIntent",
            Self::No => "AMAZON.NoIntent",
            Self::Help => "AMAZON.HelpIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::Unknown(name) => name,
        }
    }
}

impl FromStr for Intent {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "LaunchRequest" | "Launch" => Self::Launch,
            "Day" => Self::Day,
            "Scriptures" => Self::Scriptures,
            "AMAZON.YesIntent" => Self::Yes,
            "AMAZON.NextIntent" => Self::Next,
            "AMAZON.NoIntent" => Self::No,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.CancelIntent" => Self::Cancel,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Inbound turn. `date_slot` is the raw, unvalidated ISO date the user may have said.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub intent: Intent,
    pub date_slot: Option<String>,
    pub session: SessionBag,
}

impl TurnRequest {
    pub fn new(intent: Intent, session: SessionBag) -> Self {
        Self {
            intent,
            date_slot: None,
            session,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date_slot = Some(date.into());
        self
    }
}

/// Display card shown next to the speech. Cosmetic; not subject to the speech budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Rendered speech markup; never longer than the delivery budget.
    pub speech: String,
    pub card: Option<Card>,
    pub end_session: bool,
    pub session: SessionBag,
}

impl TurnResponse {
    pub fn new(speech: impl Into<String>, session: SessionBag) -> Self {
        Self {
            speech: speech.into(),
            card: None,
            end_session: false,
            session,
        }
    }

    pub fn with_card(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.card = Some(Card {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    pub fn ending(mut self) -> Self {
        self.end_session = true;
        self
    }
}
