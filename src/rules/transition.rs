//! The state-transition function.
//!
//! `apply_move(state, move)` is pure: it never touches `state`, consumes no
//! randomness, and either returns the next match value or the first rule the
//! move broke. Checks run in this order and stop at the first failure:
//!
//! 1. the match is active
//! 2. the mover owns the turn
//! 3. (pass skips the rest)
//! 4. the tile is in the mover's hand
//! 5. on a non-empty board, the tile matches the requested end

use crate::core::{
    Conclusion, EngineError, MatchState, Move, MoveKind, MoveRecord, ParticipantId, Side, TileId,
};

use super::legality::{can_move, tile_matches};
use super::terminal::blocked_winner;

/// Apply a submitted move, returning the next match value.
///
/// `MoveKind::Draw` is forwarded to [`apply_draw`].
pub fn apply_move(state: &MatchState, mv: &Move) -> Result<MatchState, EngineError> {
    match mv.kind {
        MoveKind::Place { tile, side } => apply_place(state, mv.participant, tile, side),
        MoveKind::Pass => apply_pass(state, mv.participant),
        MoveKind::Draw => apply_draw(state, mv.participant),
    }
}

/// Draw one tile from the boneyard.
///
/// Only allowed when the participant has nothing to place. If the drawn tile
/// still cannot be placed, the turn moves on without an explicit pass.
pub fn apply_draw(state: &MatchState, participant: ParticipantId) -> Result<MatchState, EngineError> {
    let idx = turn_owner(state, participant)?;
    if state.boneyard.is_empty() {
        return Err(EngineError::NoTilesToDraw);
    }
    if can_move(&state.participants[idx].hand, state.board_ends) {
        return Err(EngineError::MoveAvailable);
    }

    let mut next = state.clone();
    // The boneyard is drawn from its back end, always.
    let Some(tile) = next.boneyard.pop_back() else {
        return Err(EngineError::NoTilesToDraw);
    };
    next.participants[idx].hand.push_back(tile);
    next.consecutive_passes = 0;
    push_record(&mut next, participant, MoveKind::Draw);

    if !can_move(&next.participants[idx].hand, next.board_ends) {
        next.advance_turn();
    }
    Ok(next)
}

fn apply_place(
    state: &MatchState,
    participant: ParticipantId,
    tile_id: TileId,
    side: Side,
) -> Result<MatchState, EngineError> {
    let idx = turn_owner(state, participant)?;
    let pos = state.participants[idx]
        .find_tile(tile_id)
        .ok_or(EngineError::TileNotInHand(tile_id))?;
    let tile = state.participants[idx].hand[pos];
    if !tile_matches(tile, state.board_ends, side) {
        return Err(EngineError::TileDoesNotMatch { tile: tile_id, side });
    }

    let mut next = state.clone();
    next.board = state.board.place(tile, side)?;
    next.board_ends = next.board.ends();
    next.participants[idx].hand.remove(pos);
    next.consecutive_passes = 0;
    push_record(&mut next, participant, MoveKind::Place { tile: tile_id, side });

    if next.participants[idx].hand.is_empty() {
        return Ok(next.conclude(participant, Conclusion::EmptyHand));
    }
    next.advance_turn();
    Ok(next)
}

fn apply_pass(state: &MatchState, participant: ParticipantId) -> Result<MatchState, EngineError> {
    turn_owner(state, participant)?;

    let mut next = state.clone();
    next.consecutive_passes += 1;
    push_record(&mut next, participant, MoveKind::Pass);

    if next.consecutive_passes >= next.participant_count() {
        if let Some(winner) = blocked_winner(&next) {
            return Ok(next.conclude(winner, Conclusion::Blocked));
        }
    }
    next.advance_turn();
    Ok(next)
}

/// Seat index of `participant` if the match is active and it is their turn.
fn turn_owner(state: &MatchState, participant: ParticipantId) -> Result<usize, EngineError> {
    if !state.is_active() {
        return Err(EngineError::GameNotActive);
    }
    let current = state
        .participants
        .get(state.current_index)
        .ok_or(EngineError::GameNotActive)?;
    if current.id != participant {
        return Err(EngineError::NotYourTurn { expected: current.id, got: participant });
    }
    Ok(state.current_index)
}

fn push_record(state: &mut MatchState, participant: ParticipantId, kind: MoveKind) {
    let record = MoveRecord {
        participant,
        kind,
        turn: state.turn_number,
        sequence: state.next_sequence(),
    };
    state.record(record);
}
