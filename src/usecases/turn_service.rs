//! One conversational turn: parse the signal, fetch the day, run the delivery engine, and
//! write the resulting session bag.
//!
//! - User-facing failures (bad date, lost context, no readings) become spoken responses
//! - Lectionary failures return `Err` with the caller's bag untouched so a retry can resume

use crate::domain::session::DATE_FORMAT;
use crate::domain::{
    Cursor, Day, DomainError, Intent, OriginalIntent, SessionBag, SessionState, SpeechPart,
    TurnRequest, TurnResponse,
};
use crate::ports::{LectionaryPort, SpeechRenderer};
use crate::usecases::day_overview::{day_overview, long_date};
use crate::usecases::delivery::{DeliveryEngine, Next, Turn};
use crate::usecases::prompts::{
    GENERIC_FAILURE, HEAR_READINGS_PROMPT, HELP_SSML, INVALID_DATE, MISSING_CONTEXT,
};
use chrono::{FixedOffset, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Turn service. Stateless between turns; everything it remembers lives in the session bag.
pub struct TurnService {
    lectionary: Arc<dyn LectionaryPort>,
    renderer: Arc<dyn SpeechRenderer>,
    engine: DeliveryEngine,
    /// Offset used to decide what "today" is.
    local_offset: FixedOffset,
}

impl TurnService {
    pub fn new(
        lectionary: Arc<dyn LectionaryPort>,
        renderer: Arc<dyn SpeechRenderer>,
        engine: DeliveryEngine,
        local_offset: FixedOffset,
    ) -> Self {
        Self {
            lectionary,
            renderer,
            engine,
            local_offset,
        }
    }

    /// Handle a turn relative to the current local date.
    pub async fn handle(&self, request: TurnRequest) -> Result<TurnResponse, DomainError> {
        let today = Utc::now().with_timezone(&self.local_offset).date_naive();
        self.handle_on(request, today).await
    }

    /// Handle a turn with an explicit "today".
    pub async fn handle_on(
        &self,
        request: TurnRequest,
        today: NaiveDate,
    ) -> Result<TurnResponse, DomainError> {
        let TurnRequest {
            intent,
            date_slot,
            session,
        } = request;

        let date = match parse_slot(date_slot.as_deref()) {
            Ok(date) => date.unwrap_or(today),
            Err(e) => {
                warn!(intent = intent.name(), error = %e, "rejecting date slot");
                return Ok(self.say(INVALID_DATE, session).ending());
            }
        };

        match intent {
            Intent::Launch => self.launch(today, session).await,
            Intent::Day => self.day(date, today, session).await,
            Intent::Scriptures => self.scriptures(date, session).await,
            Intent::Yes | Intent::Next => self.resume(session).await,
            Intent::No => {
                let mut session = session;
                session.clear_tracking();
                Ok(TurnResponse::new(self.renderer.render(&[]), session).ending())
            }
            Intent::Help => {
                let mut session = session;
                session.clear_tracking();
                let card = self.renderer.plain_text(HELP_SSML);
                Ok(TurnResponse::new(HELP_SSML.trim(), session).with_card("Help", card))
            }
            Intent::Stop | Intent::Cancel => {
                Ok(TurnResponse::new(self.renderer.render(&[]), session).ending())
            }
            Intent::Unknown(name) => {
                info!(intent = %name, "unhandled intent");
                Ok(self.say(MISSING_CONTEXT, session))
            }
        }
    }

    /// Response for a turn that failed in a collaborator. The bag is returned as received.
    pub fn failure_response(&self, session: SessionBag) -> TurnResponse {
        self.say(GENERIC_FAILURE, session).ending()
    }

    /// Day overview, reading count, and an offer to start reading at reading 0.
    async fn launch(
        &self,
        today: NaiveDate,
        mut session: SessionBag,
    ) -> Result<TurnResponse, DomainError> {
        let day = self.lectionary.get_day(today).await?;
        let overview = day_overview(&day, today);
        let mut parts = overview.parts;

        if day.readings.is_empty() {
            info!(date = %today, "launch on a day without readings");
            parts.push(SpeechPart::Paragraph(
                "There are no scripture readings.".to_string(),
            ));
            session.clear_tracking();
            return Ok(TurnResponse::new(self.renderer.render(&parts), session)
                .with_card("About Today", overview.card)
                .ending());
        }

        parts.push(SpeechPart::Paragraph(format!(
            "There are {} scripture readings.",
            day.readings.len()
        )));
        parts.push(SpeechPart::Paragraph(HEAR_READINGS_PROMPT.to_string()));

        session.clear_tracking();
        SessionState::new(OriginalIntent::Launch, today, Cursor::at_reading(0)).write_to(&mut session);
        Ok(TurnResponse::new(self.renderer.render(&parts), session)
            .with_card("About Today", overview.card))
    }

    async fn day(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        session: SessionBag,
    ) -> Result<TurnResponse, DomainError> {
        let day = self.lectionary.get_day(date).await?;
        let overview = day_overview(&day, today);
        Ok(TurnResponse::new(self.renderer.render(&overview.parts), session)
            .with_card(format!("About {}", overview.when), overview.card))
    }

    async fn scriptures(
        &self,
        date: NaiveDate,
        mut session: SessionBag,
    ) -> Result<TurnResponse, DomainError> {
        let day = self.lectionary.get_day(date).await?;
        let card = readings_card(&day);

        match self.engine.start(&day) {
            Ok(turn) => {
                session.clear_tracking();
                Ok(self.apply(turn, session).with_card("Daily Readings", card))
            }
            Err(DomainError::EmptyReadingSet { date }) => {
                info!(date = %date, "no readings to start");
                let text = format!("There are no readings for {}.", long_date(date));
                Ok(self.say(&text, session).ending())
            }
            Err(e) => Err(e),
        }
    }

    async fn resume(&self, session: SessionBag) -> Result<TurnResponse, DomainError> {
        let state = match SessionState::from_bag(&session) {
            Ok(state) => state,
            Err(e) => return Ok(self.context_lost(e, session)),
        };

        let day = self.lectionary.get_day(state.date).await?;
        match self.engine.resume(&state, &day) {
            Ok(turn) => Ok(self.apply(turn, session)),
            Err(e @ DomainError::MissingContext(_)) => Ok(self.context_lost(e, session)),
            Err(e) => Err(e),
        }
    }

    /// Lost context ends the session without writing any cursor fields.
    fn context_lost(&self, error: DomainError, mut session: SessionBag) -> TurnResponse {
        warn!(error = %error, "continue without usable session");
        session.clear_tracking();
        self.say(MISSING_CONTEXT, session).ending()
    }

    fn apply(&self, turn: Turn, mut session: SessionBag) -> TurnResponse {
        match turn.next {
            Next::AwaitingContinue(state) => {
                state.write_to(&mut session);
                TurnResponse::new(turn.speech, session)
            }
            Next::Terminal => {
                session.clear_tracking();
                TurnResponse::new(turn.speech, session).ending()
            }
        }
    }

    fn say(&self, text: &str, session: SessionBag) -> TurnResponse {
        let speech = self
            .renderer
            .render(&[SpeechPart::Paragraph(text.to_string())]);
        TurnResponse::new(speech, session)
    }
}

/// Absent or blank slot is `None`; anything else must be `YYYY-MM-DD`.
fn parse_slot(slot: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match slot.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| DomainError::InvalidDate(format!("'{}': {}", s, e))),
    }
}

fn readings_card(day: &Day) -> String {
    let mut card = format!("Readings for {}:\n\n", long_date(day.date));
    for reading in &day.readings {
        card.push_str(&reading.display);
        card.push('\n');
    }
    card
}
