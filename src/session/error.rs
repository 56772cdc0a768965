//! Coordinator-level rejections.

use crate::core::{EngineError, ParticipantId};

use super::coordinator::SessionId;

/// Why a coordinator call was refused.
///
/// Like engine rejections these go back to the caller only; the session and
/// its match are left as they were.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("participant {0} is not in a session")]
    ParticipantNotFound(ParticipantId),
    #[error("session is full")]
    SessionFull,
    #[error("the match has already started")]
    AlreadyStarted,
    #[error("not enough participants: have {have}, need {need}")]
    NotEnoughParticipants { have: usize, need: usize },
    #[error("snapshot codec error: {0}")]
    Codec(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<bincode::Error> for SessionError {
    fn from(err: bincode::Error) -> Self {
        SessionError::Codec(err.to_string())
    }
}
