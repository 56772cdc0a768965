//! Engine rejections.
//!
//! Every variant is recoverable: the submitted move or draw is rejected and
//! the match value it was checked against is left untouched.

use super::board::Side;
use super::participant::ParticipantId;
use super::tile::{Pip, TileId};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("the match is not active")]
    GameNotActive,
    #[error("the match is already in progress")]
    MatchInProgress,
    #[error("not your turn: waiting on {expected}, got {got}")]
    NotYourTurn { expected: ParticipantId, got: ParticipantId },
    #[error("tile {0} is not in hand")]
    TileNotInHand(TileId),
    #[error("tile {tile} does not match the {side} end")]
    TileDoesNotMatch { tile: TileId, side: Side },
    #[error("invalid side: '{0}'")]
    InvalidSide(String),
    #[error("the boneyard is empty")]
    NoTilesToDraw,
    #[error("a legal placement is available; drawing is not allowed")]
    MoveAvailable,
    #[error("invalid participant count: {count} (allowed {min}..={max})")]
    InvalidParticipantCount { count: usize, min: usize, max: usize },
    #[error("seat {index} is out of range for {count} participants")]
    InvalidSeat { index: usize, count: usize },
    #[error("invalid tile [{left}|{right}]: pips must be at most {max}")]
    InvalidTile { left: Pip, right: Pip, max: Pip },
    #[error("invalid tile key: '{0}'")]
    InvalidTileKey(String),
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
}
