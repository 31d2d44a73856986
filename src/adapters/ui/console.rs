//! Implements InputPort. Inquire-based console that plays the voice host's role.
//!
//! Each turn: pick a signal, optionally give a date, load the stored session bag, run the turn,
//! print speech and card, save the returned bag.

use crate::adapters::ui::banner::print_heading;
use crate::domain::{DomainError, Intent, TurnRequest, TurnResponse};
use crate::ports::{InputPort, SessionStorePort, SpeechRenderer};
use crate::usecases::TurnService;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::{Select, Text};
use std::sync::Arc;
use tracing::error;

/// Menu entries. `None` quits.
const MENU: &[(&str, Option<&str>)] = &[
    ("Open the skill", Some("LaunchRequest")),
    ("About a day", Some("Day")),
    ("Read the scriptures", Some("Scriptures")),
    ("Yes", Some("AMAZON.YesIntent")),
    ("Next", Some("AMAZON.NextIntent")),
    ("No", Some("AMAZON.NoIntent")),
    ("Help", Some("AMAZON.HelpIntent")),
    ("Stop", Some("AMAZON.StopIntent")),
    ("Cancel", Some("AMAZON.CancelIntent")),
    ("Quit console", None),
];

fn input_err(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// Esc / Ctrl-C end the console instead of failing it.
fn is_exit(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Console adapter. Inquire prompts.
pub struct ConsoleInputPort {
    service: Arc<TurnService>,
    sessions: Arc<dyn SessionStorePort>,
    renderer: Arc<dyn SpeechRenderer>,
}

impl ConsoleInputPort {
    pub fn new(
        service: Arc<TurnService>,
        sessions: Arc<dyn SessionStorePort>,
        renderer: Arc<dyn SpeechRenderer>,
    ) -> Self {
        Self {
            service,
            sessions,
            renderer,
        }
    }

    /// One full turn against the stored session.
    async fn play(&self, intent: Intent, date_slot: Option<String>) -> Result<TurnResponse, DomainError> {
        let session = self.sessions.load().await?;
        let mut request = TurnRequest::new(intent, session.clone());
        if let Some(date) = date_slot {
            request = request.with_date(date);
        }
        let response = match self.service.handle(request).await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "turn failed");
                self.service.failure_response(session)
            }
        };
        self.sessions.save(&response.session).await?;
        Ok(response)
    }

    fn show(&self, response: &TurnResponse) {
        print_heading("Speech");
        println!("{}", self.renderer.plain_text(&response.speech));
        if let Some(card) = &response.card {
            print_heading(&format!("Card: {}", card.title));
            println!("{}", card.content.trim_end());
        }
        if response.end_session {
            print_heading("(session ended)");
        }
        println!();
    }
}

#[async_trait]
impl InputPort for ConsoleInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let labels: Vec<&str> = MENU.iter().map(|(label, _)| *label).collect();
        loop {
            let choice = match Select::new("What do you say?", labels.clone()).prompt() {
                Ok(c) => c,
                Err(e) if is_exit(&e) => return Ok(()),
                Err(e) => return Err(input_err(e)),
            };
            let Some(name) = MENU
                .iter()
                .find(|(label, _)| *label == choice)
                .and_then(|(_, name)| *name)
            else {
                return Ok(());
            };
            // FromStr for Intent is infallible.
            let Ok(intent) = name.parse::<Intent>();

            let date_slot = if matches!(intent, Intent::Day | Intent::Scriptures) {
                match Text::new("Date (YYYY-MM-DD, blank for today):").prompt() {
                    Ok(s) if s.trim().is_empty() => None,
                    Ok(s) => Some(s),
                    Err(e) if is_exit(&e) => return Ok(()),
                    Err(e) => return Err(input_err(e)),
                }
            } else {
                None
            };

            let response = self.play(intent, date_slot).await?;
            self.show(&response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lectionary::InMemoryLectionary;
    use crate::adapters::persistence::SessionJson;
    use crate::adapters::speech::SsmlRenderer;
    use crate::domain::{Day, DeliveryBudget, Reading, Verse};
    use crate::usecases::DeliveryEngine;
    use chrono::{FixedOffset, Utc};

    fn console(dir: &std::path::Path) -> ConsoleInputPort {
        let offset = FixedOffset::east_opt(0).unwrap();
        let today = Utc::now().with_timezone(&offset).date_naive();
        let mut day = Day::empty(today);
        day.readings = vec![
            Reading {
                book: "OT".to_string(),
                display: "Genesis 1.1-3".to_string(),
                verses: vec![Verse::new("In the beginning")],
            },
            Reading {
                book: "John".to_string(),
                display: "John 1.1-3".to_string(),
                verses: vec![Verse::new("In the beginning was the Word")],
            },
        ];
        let renderer: Arc<dyn SpeechRenderer> = Arc::new(SsmlRenderer::new());
        let service = TurnService::new(
            Arc::new(InMemoryLectionary::new([day])),
            Arc::clone(&renderer),
            DeliveryEngine::new(Arc::clone(&renderer), DeliveryBudget::default()),
            offset,
        );
        ConsoleInputPort::new(
            Arc::new(service),
            Arc::new(SessionJson::new(dir.join("session.json"))),
            renderer,
        )
    }

    #[test]
    fn test_menu_names_parse_to_known_intents() {
        for (_, name) in MENU {
            if let Some(name) = name {
                let Ok(intent) = name.parse::<Intent>();
                assert!(!matches!(intent, Intent::Unknown(_)), "{}", name);
            }
        }
    }

    #[tokio::test]
    async fn test_session_survives_between_turns() {
        let dir = tempfile::tempdir().unwrap();
        let console = console(dir.path());

        let first = console.play(Intent::Scriptures, None).await.unwrap();
        assert!(!first.end_session);
        assert!(first.speech.contains("In the beginning"));

        let second = console.play(Intent::Yes, None).await.unwrap();
        assert!(second.speech.contains("was the Word"));
        assert!(second.end_session);

        let stored = SessionJson::new(dir.path().join("session.json"))
            .load()
            .await
            .unwrap();
        assert!(stored.is_empty());
    }
}
