use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Identity of a track, stable for its whole lifetime.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

const FIRST_ID: u32 = 1;

/// Sequential id source. Every tracker owns one, so independent trackers
/// never hand out each other's ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: FIRST_ID }
    }

    /// Hands out the current id and advances. After `u32::MAX` the counter
    /// wraps back to the first id.
    pub fn next_id(&mut self) -> TrackId {
        let id = TrackId(self.next);
        self.next = self.next.checked_add(1).unwrap_or(FIRST_ID);
        id
    }

    /// The id the next birth will receive.
    #[inline]
    pub fn peek(&self) -> TrackId {
        TrackId(self.next)
    }

    pub fn reset(&mut self) {
        self.next = FIRST_ID;
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
