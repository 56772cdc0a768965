//! Participant identification and per-participant match data.
//!
//! ## ParticipantId
//!
//! Opaque identifier handed out by whoever seats the participant (the relay
//! coordinator, the local loop, or a test). It is stable across turns and
//! independent of the participant's seat index.
//!
//! ## Hand
//!
//! A persistent vector of tiles, so every match value owns its hands without
//! sharing mutable storage with earlier values.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileId};

/// A participant's private tiles. Order carries no meaning.
pub type Hand = Vector<Tile>;

/// Participant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sum of the pips left in a hand.
#[must_use]
pub fn compute_score(hand: &Hand) -> u32 {
    hand.iter().map(|t| t.pip_sum()).sum()
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub hand: Hand,
    /// Pips left in hand. Only meaningful once the match has concluded.
    pub score: u32,
    pub automated: bool,
    /// Only meaningful while the match is forming.
    pub ready: bool,
}

impl Participant {
    /// Create a human participant with an empty hand.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            score: 0,
            automated: false,
            ready: false,
        }
    }

    /// Create an automated participant. Automated seats are always ready.
    pub fn automated(id: ParticipantId, name: impl Into<String>) -> Self {
        Self { automated: true, ready: true, ..Self::new(id, name) }
    }

    /// Replace the hand.
    #[must_use]
    pub fn with_hand(mut self, tiles: impl IntoIterator<Item = Tile>) -> Self {
        self.hand = tiles.into_iter().collect();
        self
    }

    /// Position of a tile in hand by identity, ignoring declared order.
    #[must_use]
    pub fn find_tile(&self, id: TileId) -> Option<usize> {
        self.hand.iter().position(|t| t.id() == id)
    }

    #[must_use]
    pub fn holds(&self, id: TileId) -> bool {
        self.find_tile(id).is_some()
    }

    /// Pip sum of the current hand.
    #[must_use]
    pub fn pip_count(&self) -> u32 {
        compute_score(&self.hand)
    }
}
