//! Speech budget and the sizing decision derived from it.

/// Maximum speech payload per turn plus the fixed boilerplate costs that share it.
///
/// All values are rendered characters. The boilerplate costs are tuning constants measured
/// against the renderer's output, not exact figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryBudget {
    pub max_length: usize,
    /// Wrapper cost added around every verse (e.g. `<p></p>`).
    pub verse_overhead: usize,
    /// Intro spoken before the first group of a reading.
    pub preamble: usize,
    /// Prompt after the last group of a reading.
    pub closing: usize,
    /// Prompt after an intermediate group.
    pub continuation: usize,
}

impl Default for DeliveryBudget {
    fn default() -> Self {
        Self {
            max_length: 8000,
            verse_overhead: 7,
            preamble: 157,
            closing: 47,
            continuation: 61,
        }
    }
}

/// How a reading is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSize {
    /// The whole reading fits in one turn.
    Whole,
    /// Deliver `n` consecutive verses per turn (`n >= 1`).
    Chunked(usize),
}

impl GroupSize {
    /// Verses per turn for a reading of `verse_count` verses.
    pub fn verses_per_turn(&self, verse_count: usize) -> usize {
        match self {
            Self::Whole => verse_count,
            Self::Chunked(n) => *n,
        }
    }
}
