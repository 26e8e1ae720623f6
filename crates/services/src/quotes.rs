/// Seconds each quote stays on screen before the panel rotates.
pub const QUOTE_ROTATE_SECS: u64 = 12;

/// Static list of calming quotes for the decorative sidebar panel.
///
/// Purely presentational: rotation order is sequential and the display timer
/// lives with the panel, one per instance, sharing nothing.
#[derive(Debug, Clone)]
pub struct QuoteDeck {
    quotes: Vec<String>,
}

impl QuoteDeck {
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            [
                "Breathe in calm, breathe out tension.",
                "One word at a time.",
                "Stillness is a practice, not a destination.",
                "The quiet mind hears more.",
                "Return to the word, return to now.",
                "Slow is smooth, smooth is calm.",
                "Each repetition is a small arrival.",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        )
    }

    /// Build a deck from raw lines, dropping blank entries.
    #[must_use]
    pub fn new(quotes: Vec<String>) -> Self {
        Self {
            quotes: quotes
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote at `index`, wrapping past the end. Empty decks yield nothing.
    #[must_use]
    pub fn quote(&self, index: usize) -> Option<&str> {
        if self.quotes.is_empty() {
            return None;
        }
        self.quotes
            .get(index % self.quotes.len())
            .map(String::as_str)
    }
}
