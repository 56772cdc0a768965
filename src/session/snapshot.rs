//! Binary snapshots of match values and views.
//!
//! Relays that need a byte payload (persisting a session, shipping a view to
//! a client) encode with bincode. Any serde type works; `MatchState` and
//! `PublicView` are the two the coordinator hands out.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::SessionError;

/// Encode a value.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SessionError> {
    Ok(bincode::serialize(value)?)
}

/// Decode a value produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SessionError> {
    Ok(bincode::deserialize(bytes)?)
}
