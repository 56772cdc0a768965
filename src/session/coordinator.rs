//! Relay-side session coordinator.
//!
//! Owns every open session and the participant → session membership. Each
//! call locates the session, runs the engine against its current match value,
//! and either replaces that value and returns a [`SessionUpdate`] for
//! broadcast, or returns the rejection to the caller alone.
//!
//! ## Concurrency
//!
//! Each session sits behind its own `Arc<Mutex<_>>`, so submissions for one
//! match are applied one at a time while different matches proceed in
//! parallel. The two maps are behind `RwLock`s and are never held while a
//! session lock is being acquired.
//!
//! Poisoned locks are recovered. The match value is only ever replaced
//! wholesale, after the engine accepted a transition.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{
    Conclusion, EngineError, GameRng, MatchConfig, MatchId, MatchState, Move, Participant,
    ParticipantId, Phase, PublicView,
};
use crate::opponent::{Difficulty, OpponentPolicy};
use crate::rules::{apply_draw, apply_move, settle, start_match};

use super::error::SessionError;

/// Session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// What to broadcast after an accepted call: one view per seated participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub session: SessionId,
    pub views: Vec<PublicView>,
}

impl SessionUpdate {
    /// The view addressed to `participant`.
    #[must_use]
    pub fn view_for(&self, participant: ParticipantId) -> Option<&PublicView> {
        self.views.iter().find(|v| v.viewer == participant)
    }

    /// Phase of the match after the update.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.views.first().map(|v| v.phase)
    }
}

struct Session {
    state: MatchState,
    rng: GameRng,
    rematch_acks: FxHashSet<ParticipantId>,
    opponents: FxHashMap<ParticipantId, Box<dyn OpponentPolicy>>,
}

impl Session {
    fn update(&self, id: SessionId) -> SessionUpdate {
        let views = self.state.participants().iter().map(|p| self.state.view_for(p.id)).collect();
        SessionUpdate { session: id, views }
    }

    /// Deal once everyone seated is ready and the table is big enough.
    fn try_start(&mut self, config: &MatchConfig) -> Result<(), EngineError> {
        let state = &self.state;
        if state.phase() == Phase::Forming
            && state.all_ready()
            && state.participant_count() >= config.min_participants
        {
            self.state = start_match(state, config, &mut self.rng)?;
        }
        Ok(())
    }

    /// Re-deal a concluded match once every human has acknowledged it and
    /// the table is still big enough.
    fn try_rematch(&mut self, config: &MatchConfig) -> Result<(), EngineError> {
        let state = &self.state;
        let agreed = state
            .participants()
            .iter()
            .all(|p| p.automated || self.rematch_acks.contains(&p.id));
        if state.phase() == Phase::Concluded
            && agreed
            && state.participant_count() >= config.min_participants
        {
            self.state = start_match(state, config, &mut self.rng)?;
            self.rematch_acks.clear();
        }
        Ok(())
    }

    /// Replace the match with an accepted transition, concluding it if the
    /// table is now blocked.
    fn accept(&mut self, next: &MatchState) {
        self.state = settle(next);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Session coordinator.
///
/// ```
/// use domino_engine::core::{MatchConfig, Phase};
/// use domino_engine::opponent::Difficulty;
/// use domino_engine::session::Coordinator;
///
/// let coordinator = Coordinator::with_seed(MatchConfig::default(), 5);
/// let session = coordinator.create_session();
/// let (ana, _) = coordinator.join_session(session, "ana").unwrap();
/// coordinator.add_automated(session, "bot", Difficulty::Hard).unwrap();
///
/// let update = coordinator.mark_ready(ana).unwrap();
/// assert_eq!(update.phase(), Some(Phase::Active));
/// assert_eq!(update.view_for(ana).unwrap().hand.len(), 7);
/// ```
pub struct Coordinator {
    config: MatchConfig,
    rng: Mutex<GameRng>,
    sessions: RwLock<FxHashMap<SessionId, Arc<Mutex<Session>>>>,
    membership: RwLock<FxHashMap<ParticipantId, SessionId>>,
    next_session: AtomicU64,
    next_participant: AtomicU32,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl Coordinator {
    /// Create a coordinator that deals from OS entropy.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create a coordinator whose deals are reproducible from `seed`.
    #[must_use]
    pub fn with_seed(config: MatchConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    fn with_rng(config: MatchConfig, rng: GameRng) -> Self {
        Self {
            config,
            rng: Mutex::new(rng),
            sessions: RwLock::new(FxHashMap::default()),
            membership: RwLock::new(FxHashMap::default()),
            next_session: AtomicU64::new(1),
            next_participant: AtomicU32::new(1),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Open an empty, forming session.
    pub fn create_session(&self) -> SessionId {
        let id = SessionId(self.next_session.fetch_add(1, Ordering::Relaxed));
        let session = Session {
            state: MatchState::new(MatchId(id.0)),
            rng: lock(&self.rng).fork(),
            rematch_acks: FxHashSet::default(),
            opponents: FxHashMap::default(),
        };
        write(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Seat a human participant in a forming session.
    pub fn join_session(
        &self,
        session: SessionId,
        name: impl Into<String>,
    ) -> Result<(ParticipantId, SessionUpdate), SessionError> {
        self.seat(session, |id| Participant::new(id, name), None)
    }

    /// Seat an automated participant. It is ready immediately, so this can
    /// start the match.
    pub fn add_automated(
        &self,
        session: SessionId,
        name: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<(ParticipantId, SessionUpdate), SessionError> {
        self.seat(session, |id| Participant::automated(id, name), Some(difficulty.policy()))
    }

    fn seat(
        &self,
        session: SessionId,
        make: impl FnOnce(ParticipantId) -> Participant,
        policy: Option<Box<dyn OpponentPolicy>>,
    ) -> Result<(ParticipantId, SessionUpdate), SessionError> {
        let handle = self.session(session)?;
        let mut s = lock(&handle);
        if s.state.phase() != Phase::Forming {
            return Err(SessionError::AlreadyStarted);
        }
        if s.state.participant_count() >= self.config.participant_limit() {
            return Err(SessionError::SessionFull);
        }

        let id = ParticipantId::new(self.next_participant.fetch_add(1, Ordering::Relaxed));
        s.state = s.state.with_participant(make(id));
        if let Some(policy) = policy {
            s.opponents.insert(id, policy);
        }
        write(&self.membership).insert(id, session);

        s.try_start(&self.config)?;
        Ok((id, s.update(session)))
    }

    /// Flag a participant ready. The match starts when the last one does.
    pub fn mark_ready(&self, participant: ParticipantId) -> Result<SessionUpdate, SessionError> {
        let (session, handle) = self.session_for(participant)?;
        let mut s = lock(&handle);
        if s.state.phase() != Phase::Forming {
            return Err(SessionError::AlreadyStarted);
        }
        s.state = s.state.with_ready(participant, true)?;
        s.try_start(&self.config)?;
        Ok(s.update(session))
    }

    /// Apply a place or pass (or draw) from `mv.participant`.
    pub fn submit_move(&self, mv: &Move) -> Result<SessionUpdate, SessionError> {
        let (session, handle) = self.session_for(mv.participant)?;
        let mut s = lock(&handle);
        let next = apply_move(&s.state, mv)?;
        s.accept(&next);
        Ok(s.update(session))
    }

    /// Draw a tile for `participant`.
    pub fn submit_draw(&self, participant: ParticipantId) -> Result<SessionUpdate, SessionError> {
        let (session, handle) = self.session_for(participant)?;
        let mut s = lock(&handle);
        let next = apply_draw(&s.state, participant)?;
        s.accept(&next);
        Ok(s.update(session))
    }

    /// Remove a participant from their session.
    ///
    /// Returns `None` when the last human left and the session was closed.
    /// Mid-match, a human leaving so that one human remains concludes the
    /// match in that human's favour, as does a table shrinking to one seat.
    pub fn leave_session(
        &self,
        participant: ParticipantId,
    ) -> Result<Option<SessionUpdate>, SessionError> {
        let (session, handle) = self.session_for(participant)?;
        let mut s = lock(&handle);
        let was_human = s.state.participant(participant).is_some_and(|p| !p.automated);
        let next = s.state.without_participant(participant)?;
        s.opponents.remove(&participant);
        s.rematch_acks.remove(&participant);
        write(&self.membership).remove(&participant);

        if next.humans_remaining() == 0 {
            {
                let mut membership = write(&self.membership);
                for p in next.participants() {
                    membership.remove(&p.id);
                }
            }
            write(&self.sessions).remove(&session);
            s.state = next;
            return Ok(None);
        }

        match next.phase() {
            Phase::Active => {
                let forfeit_winner = if was_human && next.humans_remaining() == 1 {
                    next.participants().iter().find(|p| !p.automated).map(|p| p.id)
                } else if next.participant_count() == 1 {
                    next.participants().front().map(|p| p.id)
                } else {
                    None
                };
                s.state = match forfeit_winner {
                    Some(winner) => next.conclude(winner, Conclusion::Forfeit),
                    None => settle(&next),
                };
            }
            Phase::Forming => {
                s.state = next;
                s.try_start(&self.config)?;
            }
            Phase::Concluded => {
                s.state = next;
                s.try_rematch(&self.config)?;
            }
        }
        Ok(Some(s.update(session)))
    }

    /// Acknowledge a concluded match and ask for another.
    ///
    /// Automated seats always agree. Once every human has asked, the same
    /// roster is re-dealt.
    pub fn request_rematch(
        &self,
        participant: ParticipantId,
    ) -> Result<SessionUpdate, SessionError> {
        let (session, handle) = self.session_for(participant)?;
        let mut s = lock(&handle);
        match s.state.phase() {
            Phase::Forming => return Err(EngineError::GameNotActive.into()),
            Phase::Active => return Err(EngineError::MatchInProgress.into()),
            Phase::Concluded => {}
        }
        let have = s.state.participant_count();
        let need = self.config.min_participants;
        if have < need {
            return Err(SessionError::NotEnoughParticipants { have, need });
        }

        s.rematch_acks.insert(participant);
        s.try_rematch(&self.config)?;
        Ok(s.update(session))
    }

    /// Play automated seats until a human is on turn or the match ends.
    ///
    /// Returns `None` when no automated seat was on turn.
    pub fn run_automated_turns(
        &self,
        session: SessionId,
    ) -> Result<Option<SessionUpdate>, SessionError> {
        let handle = self.session(session)?;
        let mut guard = lock(&handle);
        let s = &mut *guard;

        let mut moved = false;
        loop {
            let Some(current) = s.state.current_participant().map(|p| p.id) else {
                break;
            };
            let Some(policy) = s.opponents.get(&current) else {
                break;
            };
            let Some(mv) = policy.choose(&s.state, current, &mut s.rng) else {
                break;
            };
            let next = apply_move(&s.state, &mv)?;
            s.accept(&next);
            moved = true;
        }
        Ok(moved.then(|| s.update(session)))
    }

    /// Full match value of a session.
    pub fn snapshot(&self, session: SessionId) -> Result<MatchState, SessionError> {
        let handle = self.session(session)?;
        let s = lock(&handle);
        Ok(s.state.clone())
    }

    /// What `participant` currently sees.
    pub fn view(&self, participant: ParticipantId) -> Result<PublicView, SessionError> {
        let (_, handle) = self.session_for(participant)?;
        let s = lock(&handle);
        Ok(s.state.view_for(participant))
    }

    #[must_use]
    pub fn session_of(&self, participant: ParticipantId) -> Option<SessionId> {
        read(&self.membership).get(&participant).copied()
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        read(&self.sessions).len()
    }

    fn session(&self, id: SessionId) -> Result<Arc<Mutex<Session>>, SessionError> {
        read(&self.sessions).get(&id).cloned().ok_or(SessionError::SessionNotFound(id))
    }

    fn session_for(
        &self,
        participant: ParticipantId,
    ) -> Result<(SessionId, Arc<Mutex<Session>>), SessionError> {
        let session =
            self.session_of(participant).ok_or(SessionError::ParticipantNotFound(participant))?;
        Ok((session, self.session(session)?))
    }
}
