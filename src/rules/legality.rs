//! Legal-move enumeration.
//!
//! Shared by move validation and by automated opponents, so everything here
//! is a pure read of its arguments.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardEnds, MatchState, ParticipantId, Side, Tile};

/// A tile that may be placed on a given side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidMove {
    pub tile: Tile,
    pub side: Side,
}

/// Inline storage for the usual handful of candidates.
pub type ValidMoves = SmallVec<[ValidMove; 8]>;

/// Whether `tile` can join the chain on `side`.
///
/// Anything matches an empty board.
#[must_use]
pub fn tile_matches(tile: Tile, ends: Option<BoardEnds>, side: Side) -> bool {
    ends.map_or(true, |e| tile.has(e.value(side)))
}

/// Every `(tile, side)` pair the hand can play against `ends`.
///
/// On an empty board every tile is playable and is reported once, against
/// `Side::Left`. Otherwise a tile matching both ends appears once per side.
/// Repeated tiles in the hand do not produce repeated entries.
///
/// ```
/// use domino_engine::core::{BoardEnds, Side, Tile};
/// use domino_engine::rules::valid_moves;
///
/// let hand = [Tile::new(2, 5), Tile::new(6, 6)];
/// let moves = valid_moves(&hand, Some(BoardEnds { left: 2, right: 5 }));
/// assert_eq!(moves.len(), 2);
/// assert!(moves.iter().all(|m| m.tile == Tile::new(2, 5)));
/// ```
#[must_use]
pub fn valid_moves<'a>(
    hand: impl IntoIterator<Item = &'a Tile>,
    ends: Option<BoardEnds>,
) -> ValidMoves {
    let mut out = ValidMoves::new();
    let mut push = |candidate: ValidMove| {
        if !out.iter().any(|m| m.tile.id() == candidate.tile.id() && m.side == candidate.side) {
            out.push(candidate);
        }
    };

    for &tile in hand {
        match ends {
            None => push(ValidMove { tile, side: Side::Left }),
            Some(e) => {
                for (side, value) in e.iter() {
                    if tile.has(value) {
                        push(ValidMove { tile, side });
                    }
                }
            }
        }
    }
    out
}

/// Whether the hand has anything to place.
///
/// Always true on an empty board: an opening hand is never empty.
#[must_use]
pub fn can_move<'a>(hand: impl IntoIterator<Item = &'a Tile>, ends: Option<BoardEnds>) -> bool {
    ends.is_none() || !valid_moves(hand, ends).is_empty()
}

/// Legal placements for one participant in a match, empty if they are not
/// seated.
#[must_use]
pub fn valid_moves_for(state: &MatchState, participant: ParticipantId) -> ValidMoves {
    state
        .participant(participant)
        .map(|p| valid_moves(&p.hand, state.board_ends()))
        .unwrap_or_default()
}
