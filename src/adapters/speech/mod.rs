//! Speech adapters. Implement SpeechRenderer.

pub mod ssml;

pub use ssml::{SsmlBuilder, SsmlRenderer, strip_markup};
