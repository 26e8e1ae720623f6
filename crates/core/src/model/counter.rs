/// In-memory tally for the current practice round.
///
/// Purely local state: nothing is persisted until the user saves, and reset
/// clears both tallies without touching storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: u32,
    lost_focus: u32,
}

impl Counter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn lost_focus(&self) -> u32 {
        self.lost_focus
    }

    /// One repetition of the word. Saturates instead of wrapping.
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// The counter area lost focus mid-round.
    pub fn record_lost_focus(&mut self) {
        self.lost_focus = self.lost_focus.saturating_add(1);
    }

    /// Clears both tallies.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when there is nothing worth saving.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
