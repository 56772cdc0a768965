//! The dominoes rules engine.
//!
//! Pure functions over `core` values:
//! - `dealing`: tile-set shuffle, deal, starting participant, match start
//! - `legality`: legal-move enumeration
//! - `transition`: `apply_move` / `apply_draw`, the only state transitions
//! - `terminal`: blocked detection, blocked winner, scoring
//!
//! Nothing here holds state between calls. Randomness enters only through the
//! `GameRng` passed to the dealing functions.
//!
//! ```
//! use domino_engine::core::{GameRng, MatchConfig, MatchId, MatchState, Move, Participant, ParticipantId};
//! use domino_engine::rules::{apply_move, start_match, valid_moves_for};
//!
//! let forming = MatchState::new(MatchId(1))
//!     .with_participant(Participant::new(ParticipantId::new(1), "ana"))
//!     .with_participant(Participant::new(ParticipantId::new(2), "ben"));
//! let state = start_match(&forming, &MatchConfig::default(), &mut GameRng::new(42)).unwrap();
//!
//! let mover = state.current_participant().unwrap().id;
//! let first = valid_moves_for(&state, mover)[0];
//! let next = apply_move(&state, &Move::place(mover, first.tile.id(), first.side)).unwrap();
//! assert_eq!(next.board().len(), 1);
//! ```

pub mod dealing;
pub mod legality;
pub mod terminal;
pub mod transition;

pub use dealing::{choose_starting_participant, deal, deal_with, shuffle, start_match, Deal};
pub use legality::{can_move, tile_matches, valid_moves, valid_moves_for, ValidMove, ValidMoves};
pub use terminal::{blocked_winner, compute_score, is_blocked, settle};
pub use transition::{apply_draw, apply_move};

/// The standard double-six tile set, in generation order.
pub use crate::core::generate_tile_set;
