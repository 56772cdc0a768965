//! What one participant is allowed to see.
//!
//! The relay broadcasts views, not the raw `MatchState`: each recipient gets
//! their own hand, the board, and only the sizes of everyone else's hands.
//! Scores are revealed once the match has concluded.

use serde::{Deserialize, Serialize};

use super::board::{BoardEnds, PlacedTile};
use super::participant::ParticipantId;
use super::state::{Conclusion, MatchId, MatchState, Phase};
use super::tile::Tile;

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: ParticipantId,
    pub name: String,
    pub hand_size: usize,
    pub automated: bool,
    pub ready: bool,
    /// Present only after the match has concluded.
    pub score: Option<u32>,
}

/// A participant's projection of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    pub match_id: MatchId,
    pub viewer: ParticipantId,
    /// The viewer's own tiles. Empty for a viewer who is not seated.
    pub hand: Vec<Tile>,
    pub seats: Vec<SeatView>,
    pub current: Option<ParticipantId>,
    pub board: Vec<PlacedTile>,
    pub ends: Option<BoardEnds>,
    pub boneyard_size: usize,
    pub phase: Phase,
    pub winner: Option<ParticipantId>,
    pub conclusion: Option<Conclusion>,
    pub consecutive_passes: usize,
    pub turn_number: u32,
}

impl MatchState {
    /// Project the match for `viewer`.
    #[must_use]
    pub fn view_for(&self, viewer: ParticipantId) -> PublicView {
        let concluded = self.is_terminal();
        let seats = self
            .participants()
            .iter()
            .map(|p| SeatView {
                id: p.id,
                name: p.name.clone(),
                hand_size: p.hand.len(),
                automated: p.automated,
                ready: p.ready,
                score: concluded.then_some(p.score),
            })
            .collect();

        PublicView {
            match_id: self.id(),
            viewer,
            hand: self
                .participant(viewer)
                .map(|p| p.hand.iter().copied().collect())
                .unwrap_or_default(),
            seats,
            current: self.current_participant().map(|p| p.id),
            board: self.board().iter().copied().collect(),
            ends: self.board_ends(),
            boneyard_size: self.boneyard().len(),
            phase: self.phase(),
            winner: self.winner(),
            conclusion: self.conclusion(),
            consecutive_passes: self.consecutive_passes(),
            turn_number: self.turn_number(),
        }
    }
}
