//! Renderer-agnostic speech script. Use cases emit parts; a renderer turns them into markup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakStrength {
    Medium,
    Strong,
}

impl BreakStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    /// Pause length that accompanies the strength.
    pub fn time(&self) -> &'static str {
        match self {
            Self::Medium => "750ms",
            Self::Strong => "1500ms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechPart {
    /// Prose paragraph. May already contain speech markup (e.g. ordinal hints).
    Paragraph(String),
    /// Raw verse content; the renderer strips inline emphasis markup.
    Verse(String),
    Break(BreakStrength),
}
