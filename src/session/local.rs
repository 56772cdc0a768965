//! Offline play: one human against automated opponents in-process.
//!
//! The caller drives the loop. Human moves go through [`LocalGame::play`];
//! automated seats act from [`LocalGame::tick`], which a UI calls on every
//! frame. With a thinking delay configured, the first tick on an automated
//! turn only arms a deadline and the move is applied on the first tick at or
//! after it. The match value is never partially updated while waiting.

use std::time::{Duration, Instant};

use crate::core::{
    GameRng, MatchConfig, MatchId, MatchState, Move, MoveKind, Participant, ParticipantId,
    PublicView,
};
use crate::opponent::{Difficulty, OpponentPolicy};
use crate::rules::{apply_move, settle, start_match};

use super::error::SessionError;

/// A local match.
pub struct LocalGame {
    config: MatchConfig,
    state: MatchState,
    rng: GameRng,
    human: ParticipantId,
    opponents: Vec<(ParticipantId, Box<dyn OpponentPolicy>)>,
    next_action_at: Option<Instant>,
}

impl LocalGame {
    /// Seat the human first and one automated opponent per difficulty, then
    /// deal.
    pub fn new(
        config: MatchConfig,
        human_name: impl Into<String>,
        opponents: &[Difficulty],
        seed: u64,
    ) -> Result<Self, SessionError> {
        let seats = opponents.len() + 1;
        if seats < config.min_participants {
            return Err(SessionError::NotEnoughParticipants {
                have: seats,
                need: config.min_participants,
            });
        }
        if seats > config.participant_limit() {
            return Err(SessionError::SessionFull);
        }

        let human = ParticipantId::new(1);
        let mut forming = MatchState::new(MatchId(seed))
            .with_participant(Participant { ready: true, ..Participant::new(human, human_name) });
        let mut policies = Vec::with_capacity(opponents.len());
        for (i, difficulty) in opponents.iter().enumerate() {
            let id = ParticipantId::new(i as u32 + 2);
            forming = forming.with_participant(Participant::automated(id, format!("bot {}", i + 1)));
            policies.push((id, difficulty.policy()));
        }

        let mut rng = GameRng::new(seed);
        let state = start_match(&forming, &config, &mut rng)?;
        Ok(Self { config, state, rng, human, opponents: policies, next_action_at: None })
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn human(&self) -> ParticipantId {
        self.human
    }

    /// The human's view of the table.
    #[must_use]
    pub fn view(&self) -> PublicView {
        self.state.view_for(self.human)
    }

    /// Whether an automated seat is on turn.
    #[must_use]
    pub fn awaiting_opponent(&self) -> bool {
        self.state.current_participant().is_some_and(|p| p.id != self.human)
    }

    /// Apply a move for the human.
    pub fn play(&mut self, kind: MoveKind) -> Result<(), SessionError> {
        let next = apply_move(&self.state, &Move::new(self.human, kind))?;
        self.state = settle(&next);
        self.next_action_at = None;
        Ok(())
    }

    /// Let the automated seat on turn act if its deadline has passed.
    ///
    /// Returns `true` when a move was applied. One automated move per call.
    pub fn tick(&mut self, now: Instant) -> Result<bool, SessionError> {
        if !self.awaiting_opponent() {
            self.next_action_at = None;
            return Ok(false);
        }

        let delay = self.config.thinking_delay_ms;
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(deadline) if now < deadline => return Ok(false),
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        let Some(current) = self.state.current_participant().map(|p| p.id) else {
            return Ok(false);
        };
        let Some((_, policy)) = self.opponents.iter().find(|(id, _)| *id == current) else {
            return Ok(false);
        };
        let Some(mv) = policy.choose(&self.state, current, &mut self.rng) else {
            return Ok(false);
        };
        let next = apply_move(&self.state, &mv)?;
        self.state = settle(&next);
        Ok(true)
    }

    /// Re-deal a concluded match with the same seats.
    pub fn rematch(&mut self) -> Result<(), SessionError> {
        self.state = start_match(&self.state, &self.config, &mut self.rng)?;
        self.next_action_at = None;
        Ok(())
    }
}
