//! Core value types: tiles, board, participants, moves, match state.
//!
//! Everything here is plain data plus queries. The rules that move a match
//! from one value to the next live in `rules`.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod participant;
pub mod rng;
pub mod state;
pub mod tile;
pub mod view;

pub use action::{Move, MoveKind, MoveRecord};
pub use board::{Board, BoardEnds, Orientation, PlacedTile, Side};
pub use config::MatchConfig;
pub use error::EngineError;
pub use participant::{compute_score, Hand, Participant, ParticipantId};
pub use rng::{GameRng, GameRngState};
pub use state::{Conclusion, MatchId, MatchState, Phase};
pub use tile::{generate_tile_set, generate_tile_set_with, Pip, Tile, TileId, DOUBLE_SIX};
pub use view::{PublicView, SeatView};
