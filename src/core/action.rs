//! Submitted moves and the history they leave behind.
//!
//! A move is a participant plus one of three intents:
//! - `Place`: put a tile from hand on one end of the chain
//! - `Pass`: give up the turn
//! - `Draw`: take a tile from the boneyard (only when nothing can be placed)
//!
//! The engine validates the intent; nothing here checks legality.

use serde::{Deserialize, Serialize};

use super::board::Side;
use super::participant::ParticipantId;
use super::tile::TileId;

/// What a participant wants to do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Place { tile: TileId, side: Side },
    Pass,
    Draw,
}

impl MoveKind {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, MoveKind::Pass)
    }
}

/// A complete submission: who, and what.
///
/// ```
/// use domino_engine::core::{Move, MoveKind, ParticipantId, Side, TileId};
///
/// let mv = Move::place(ParticipantId::new(1), TileId::new(2, 3), Side::Left);
/// assert!(matches!(mv.kind, MoveKind::Place { side: Side::Left, .. }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub participant: ParticipantId,
    pub kind: MoveKind,
}

impl Move {
    #[must_use]
    pub fn new(participant: ParticipantId, kind: MoveKind) -> Self {
        Self { participant, kind }
    }

    #[must_use]
    pub fn place(participant: ParticipantId, tile: TileId, side: Side) -> Self {
        Self::new(participant, MoveKind::Place { tile, side })
    }

    #[must_use]
    pub fn pass(participant: ParticipantId) -> Self {
        Self::new(participant, MoveKind::Pass)
    }

    #[must_use]
    pub fn draw(participant: ParticipantId) -> Self {
        Self::new(participant, MoveKind::Draw)
    }
}

/// An accepted move, as kept in the match history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub participant: ParticipantId,
    pub kind: MoveKind,
    /// Turn number when the move was accepted (starts at 1).
    pub turn: u32,
    /// Position in the history (starts at 0).
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let p = ParticipantId::new(4);
        assert_eq!(Move::pass(p).kind, MoveKind::Pass);
        assert_eq!(Move::draw(p).kind, MoveKind::Draw);
        assert!(Move::pass(p).kind.is_pass());
        assert!(!Move::draw(p).kind.is_pass());

        let mv = Move::place(p, TileId::new(6, 1), Side::Right);
        assert_eq!(mv.participant, p);
        assert_eq!(mv.kind, MoveKind::Place { tile: TileId::new(1, 6), side: Side::Right });
    }

    #[test]
    fn test_tagged_serialization() {
        let kind = MoveKind::Place { tile: TileId::new(2, 3), side: Side::Left };
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json["Place"]["side"], "Left");

        let pass: MoveKind = serde_json::from_str(r#""Pass""#).unwrap();
        assert_eq!(pass, MoveKind::Pass);
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::place(ParticipantId::new(1), TileId::new(0, 5), Side::Right);
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);
    }
}
