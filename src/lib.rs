//! # domino-engine
//!
//! An authoritative engine for block/draw dominoes, plus the session layer
//! that runs it for a relay or for local play.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply_move(state, move)` returns a new match
//!    value or a typed rejection. No hidden state, no randomness mid-turn.
//!
//! 2. **Immutable match values**: `MatchState` is built on `im-rs`
//!    persistent vectors, so every transition clones cheaply and a rejected
//!    move leaves the caller's value untouched.
//!
//! 3. **Derived board ends**: open ends are recomputed from the chain after
//!    every placement, never patched incrementally.
//!
//! ## Modules
//!
//! - `core`: tiles, board, participants, moves, match state, views, RNG,
//!   configuration, errors
//! - `rules`: dealing, legal moves, `apply_move` / `apply_draw`, blocked
//!   detection and scoring
//! - `opponent`: automated-opponent policies
//! - `session`: relay coordinator, local loop, snapshot codec

pub mod core;
pub mod opponent;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardEnds, Conclusion, EngineError, GameRng, MatchConfig, MatchId, MatchState, Move,
    MoveKind, MoveRecord, Orientation, Participant, ParticipantId, Phase, PlacedTile, PublicView,
    Side, Tile, TileId,
};

pub use crate::rules::{
    apply_draw, apply_move, can_move, choose_starting_participant, compute_score, deal,
    generate_tile_set, is_blocked, settle, shuffle, start_match, valid_moves, ValidMove,
};

pub use crate::opponent::{Difficulty, GreedyOpponent, OpponentPolicy, RandomOpponent};

pub use crate::session::{Coordinator, LocalGame, SessionError, SessionId, SessionUpdate};
