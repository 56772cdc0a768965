//! End-of-match detection and scoring.

use crate::core::{Conclusion, MatchState, Participant, ParticipantId};

use super::legality::can_move;

pub use crate::core::compute_score;

/// Whether an active match can no longer progress.
///
/// True when the boneyard is empty and no seated participant holds a tile
/// matching either open end. An empty board is never blocked.
#[must_use]
pub fn is_blocked(state: &MatchState) -> bool {
    state.is_active()
        && state.board_ends.is_some()
        && state.boneyard.is_empty()
        && state.participants.iter().all(|p| !can_move(&p.hand, state.board_ends))
}

/// Winner of a blocked match: the lowest pip count, earliest seat on ties.
#[must_use]
pub fn blocked_winner(state: &MatchState) -> Option<ParticipantId> {
    lowest_pip_count(state.participants.iter())
}

fn lowest_pip_count<'a>(participants: impl Iterator<Item = &'a Participant>) -> Option<ParticipantId> {
    participants
        .enumerate()
        .min_by_key(|(seat, p)| (p.pip_count(), *seat))
        .map(|(_, p)| p.id)
}

/// Conclude the match if it is blocked; otherwise return it unchanged.
///
/// Run after every accepted transition so a dead table does not wait on a
/// round of passes.
#[must_use]
pub fn settle(state: &MatchState) -> MatchState {
    if !is_blocked(state) {
        return state.clone();
    }
    match blocked_winner(state) {
        Some(winner) => state.conclude(winner, Conclusion::Blocked),
        None => state.clone(),
    }
}
