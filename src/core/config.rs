//! Match configuration.
//!
//! Defaults describe the standard game: a double-six set, seven-tile hands,
//! two to four participants. Nothing in the engine reads these numbers from
//! anywhere else, so other sets (double-nine, five-tile hands) only need a
//! different `MatchConfig`.

use serde::{Deserialize, Serialize};

use super::tile::{Pip, DOUBLE_SIX};

/// Configuration for dealing, seating and the local opponent loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Highest pip value in the tile set (6 for double-six).
    pub max_pip: Pip,

    /// Tiles dealt to each participant.
    pub hand_size: usize,

    /// Participants required before a match can start.
    pub min_participants: usize,

    /// Seats per session. Also capped by how many hands the set can deal.
    pub max_participants: usize,

    /// Delay before an automated opponent acts in the local loop.
    pub thinking_delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_pip: DOUBLE_SIX,
            hand_size: 7,
            min_participants: 2,
            max_participants: 4,
            thinking_delay_ms: 0,
        }
    }
}

impl MatchConfig {
    /// Create the standard double-six configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest pip value.
    pub fn with_max_pip(mut self, max_pip: Pip) -> Self {
        self.max_pip = max_pip;
        self
    }

    /// Set the hand size.
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the seating range.
    pub fn with_participants(mut self, min: usize, max: usize) -> Self {
        self.min_participants = min;
        self.max_participants = max;
        self
    }

    /// Set the automated opponent's thinking delay.
    pub fn with_thinking_delay_ms(mut self, delay_ms: u64) -> Self {
        self.thinking_delay_ms = delay_ms;
        self
    }

    /// Number of tiles in the configured set.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let n = self.max_pip as usize + 1;
        n * (n + 1) / 2
    }

    /// Largest participant count that can actually be dealt.
    #[must_use]
    pub fn participant_limit(&self) -> usize {
        if self.hand_size == 0 {
            return self.max_participants;
        }
        self.max_participants.min(self.tile_count() / self.hand_size)
    }
}
