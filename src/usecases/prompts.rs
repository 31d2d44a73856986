//! Fixed spoken phrases. Wording is tunable; lengths feed the budget defaults in config.

pub const CONTINUE_PROMPT: &str = "This is a long reading. Would you like me to continue?";
pub const NEXT_READING_PROMPT: &str = "Would you like to hear the next reading?";
pub const END_OF_READINGS: &str = "That is the end of the readings.";
pub const HEAR_READINGS_PROMPT: &str = "Would you like to hear the readings?";
pub const READING_NOT_FOUND: &str = "Orthodox Daily could not find that reading.";
pub const OVERSIZED_APOLOGY: &str =
    r#"<say-as interpret-as="interjection">Whew</say-as>, that passage is too long for me."#;
pub const INVALID_DATE: &str = "I didn't understand the date you requested.";
pub const MISSING_CONTEXT: &str = "I'm not sure what you mean in this context.";
pub const GENERIC_FAILURE: &str = "Sorry, I couldn't get the readings right now. Please try again later.";

/// Help speech and card source, markup included.
pub const HELP_SSML: &str = include_str!("../../templates/help.ssml");
