//! The match: one value holding everything the engine arbitrates.
//!
//! ## Immutability
//!
//! `MatchState` is never mutated in place by the engine. Every transition
//! clones the value (cheap: hands, boneyard, board and history are `im`
//! persistent vectors) and returns the modified copy. A rejected move hands
//! back an error and the caller still holds the untouched original.
//!
//! ## Lifecycle
//!
//! `Forming` (seats fill, ready flags) → `Active` (dealt, turns run) →
//! `Concluded` (winner known, scores filled). A rematch re-deals and returns
//! to `Active` with the same roster.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::board::{Board, BoardEnds};
use super::config::MatchConfig;
use super::error::EngineError;
use super::participant::{compute_score, Participant, ParticipantId};
use super::tile::Tile;

/// Match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Forming,
    Active,
    Concluded,
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conclusion {
    /// The winner placed their last tile.
    EmptyHand,
    /// Nobody could move; lowest pip count won.
    Blocked,
    /// Everyone else left.
    Forfeit,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) id: MatchId,
    pub(crate) participants: Vector<Participant>,
    pub(crate) current_index: usize,
    pub(crate) board: Board,
    /// Always `board.ends()`; rewritten after every placement.
    pub(crate) board_ends: Option<BoardEnds>,
    pub(crate) boneyard: Vector<Tile>,
    pub(crate) consecutive_passes: usize,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<ParticipantId>,
    pub(crate) conclusion: Option<Conclusion>,
    pub(crate) turn_number: u32,
    pub(crate) history: Vector<MoveRecord>,
}

impl MatchState {
    /// Create an empty, forming match.
    #[must_use]
    pub fn new(id: MatchId) -> Self {
        Self {
            id,
            participants: Vector::new(),
            current_index: 0,
            board: Board::new(),
            board_ends: None,
            boneyard: Vector::new(),
            consecutive_passes: 0,
            phase: Phase::Forming,
            winner: None,
            conclusion: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    /// Create an active match from hands that were dealt elsewhere.
    ///
    /// Used for fixed scenarios and for replaying a known deal. The board
    /// starts empty and `current_index` picks who moves first.
    pub fn in_progress(
        id: MatchId,
        participants: Vec<Participant>,
        boneyard: Vec<Tile>,
        current_index: usize,
    ) -> Result<Self, EngineError> {
        if participants.is_empty() {
            return Err(EngineError::InvalidParticipantCount {
                count: 0,
                min: 1,
                max: MatchConfig::default().participant_limit(),
            });
        }
        if current_index >= participants.len() {
            return Err(EngineError::InvalidSeat {
                index: current_index,
                count: participants.len(),
            });
        }
        Ok(Self {
            participants: participants.into(),
            boneyard: boneyard.into(),
            current_index,
            phase: Phase::Active,
            ..Self::new(id)
        })
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Terminal flag: true once the match has concluded.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Concluded
    }

    #[must_use]
    pub fn participants(&self) -> &Vector<Participant> {
        &self.participants
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Seat index of a participant.
    #[must_use]
    pub fn index_of(&self, id: ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The participant whose turn it is, while the match is active.
    #[must_use]
    pub fn current_participant(&self) -> Option<&Participant> {
        if !self.is_active() {
            return None;
        }
        self.participants.get(self.current_index)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn board_ends(&self) -> Option<BoardEnds> {
        self.board_ends
    }

    #[must_use]
    pub fn boneyard(&self) -> &Vector<Tile> {
        &self.boneyard
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    #[must_use]
    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    #[must_use]
    pub fn conclusion(&self) -> Option<Conclusion> {
        self.conclusion
    }

    /// Turn counter; starts at 1 and advances with every rotation.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every accepted move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Non-automated participants still seated.
    #[must_use]
    pub fn humans_remaining(&self) -> usize {
        self.participants.iter().filter(|p| !p.automated).count()
    }

    /// Whether every seated participant has flagged ready.
    #[must_use]
    pub fn all_ready(&self) -> bool {
        !self.participants.is_empty() && self.participants.iter().all(|p| p.ready)
    }

    // === Roster changes ===

    /// Seat a participant at the end of the table.
    #[must_use]
    pub fn with_participant(&self, participant: Participant) -> Self {
        let mut next = self.clone();
        next.participants.push_back(participant);
        next
    }

    /// Set a participant's ready flag.
    pub fn with_ready(&self, id: ParticipantId, ready: bool) -> Result<Self, EngineError> {
        let idx = self.index_of(id).ok_or(EngineError::UnknownParticipant(id))?;
        let mut next = self.clone();
        next.participants[idx].ready = ready;
        Ok(next)
    }

    /// Remove a participant. Their tiles leave play.
    ///
    /// Mid-match the turn stays with whoever was next in seat order, and the
    /// pass counter restarts because the table it counted against changed.
    pub fn without_participant(&self, id: ParticipantId) -> Result<Self, EngineError> {
        let idx = self.index_of(id).ok_or(EngineError::UnknownParticipant(id))?;
        let mut next = self.clone();
        next.participants.remove(idx);

        let remaining = next.participants.len();
        if remaining == 0 {
            next.current_index = 0;
        } else if idx < next.current_index {
            next.current_index -= 1;
        } else if next.current_index >= remaining {
            next.current_index = 0;
        }
        if next.is_active() {
            next.consecutive_passes = 0;
        }
        Ok(next)
    }

    // === Conclusion ===

    /// End the match with `winner`, filling in every participant's score.
    ///
    /// Used by the engine's own terminal checks and by a coordinator that
    /// decides a forfeit.
    #[must_use]
    pub fn conclude(&self, winner: ParticipantId, reason: Conclusion) -> Self {
        let mut next = self.clone();
        for p in next.participants.iter_mut() {
            p.score = compute_score(&p.hand);
        }
        next.phase = Phase::Concluded;
        next.winner = Some(winner);
        next.conclusion = Some(reason);
        next
    }

    // === Internal helpers for the rules module ===

    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }

    pub(crate) fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }

    /// Move the turn to the next seat.
    pub(crate) fn advance_turn(&mut self) {
        let n = self.participants.len();
        if n > 0 {
            self.current_index = (self.current_index + 1) % n;
        }
        self.turn_number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::TileId;

    fn seat(id: u32, tiles: &[(u8, u8)]) -> Participant {
        Participant::new(ParticipantId::new(id), format!("p{id}"))
            .with_hand(tiles.iter().map(|&(a, b)| Tile::new(a, b)))
    }

    #[test]
    fn test_new_match_is_forming() {
        let state = MatchState::new(MatchId(1));
        assert_eq!(state.phase(), Phase::Forming);
        assert_eq!(state.participant_count(), 0);
        assert_eq!(state.turn_number(), 1);
        assert!(state.current_participant().is_none());
        assert!(!state.all_ready());
    }

    #[test]
    fn test_in_progress_validates_seats() {
        let state =
            MatchState::in_progress(MatchId(1), vec![seat(1, &[(1, 2)])], vec![], 0).unwrap();
        assert!(state.is_active());
        assert_eq!(state.current_participant().unwrap().id, ParticipantId::new(1));

        assert_eq!(
            MatchState::in_progress(MatchId(1), vec![], vec![], 0),
            Err(EngineError::InvalidParticipantCount { count: 0, min: 1, max: 4 })
        );
        assert_eq!(
            MatchState::in_progress(MatchId(1), vec![seat(1, &[]), seat(2, &[])], vec![], 2),
            Err(EngineError::InvalidSeat { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_roster_changes_return_new_values() {
        let forming = MatchState::new(MatchId(1));
        let one = forming.with_participant(seat(1, &[]));
        let two = one.with_participant(seat(2, &[]));

        assert_eq!(forming.participant_count(), 0);
        assert_eq!(one.participant_count(), 1);
        assert_eq!(two.participant_count(), 2);
        assert_eq!(two.index_of(ParticipantId::new(2)), Some(1));

        let ready = two.with_ready(ParticipantId::new(1), true).unwrap();
        assert!(!ready.all_ready());
        let ready = ready.with_ready(ParticipantId::new(2), true).unwrap();
        assert!(ready.all_ready());
        assert!(!two.participant(ParticipantId::new(1)).unwrap().ready);

        assert_eq!(
            two.with_ready(ParticipantId::new(9), true),
            Err(EngineError::UnknownParticipant(ParticipantId::new(9)))
        );
    }

    #[test]
    fn test_removal_reanchors_turn() {
        let seats = vec![seat(1, &[(0, 1)]), seat(2, &[(0, 2)]), seat(3, &[(0, 3)])];
        let state = MatchState::in_progress(MatchId(1), seats, vec![], 2).unwrap();

        // Removing an earlier seat keeps the same participant on turn.
        let next = state.without_participant(ParticipantId::new(1)).unwrap();
        assert_eq!(next.current_participant().unwrap().id, ParticipantId::new(3));

        // Removing the current, last seat wraps to the first.
        let next = state.without_participant(ParticipantId::new(3)).unwrap();
        assert_eq!(next.current_participant().unwrap().id, ParticipantId::new(1));
    }

    #[test]
    fn test_conclude_fills_scores() {
        let seats = vec![seat(1, &[(6, 6)]), seat(2, &[(1, 2), (0, 3)])];
        let state = MatchState::in_progress(MatchId(1), seats, vec![], 0).unwrap();
        let done = state.conclude(ParticipantId::new(2), Conclusion::Forfeit);

        assert!(done.is_terminal());
        assert_eq!(done.winner(), Some(ParticipantId::new(2)));
        assert_eq!(done.conclusion(), Some(Conclusion::Forfeit));
        assert_eq!(done.participants()[0].score, 12);
        assert_eq!(done.participants()[1].score, 6);
        assert!(done.current_participant().is_none());
        assert!(state.is_active());
    }

    #[test]
    fn test_state_serialization() {
        let seats = vec![seat(1, &[(3, 4)]), seat(2, &[(5, 5)])];
        let state = MatchState::in_progress(MatchId(9), seats, vec![Tile::new(0, 0)], 1).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
        assert!(deserialized.participants()[0].holds(TileId::new(3, 4)));
    }
}
