//! Session coordination around the engine.
//!
//! - `coordinator`: relay-side sessions, membership, broadcast updates
//! - `local`: single-process play against automated opponents
//! - `snapshot`: bincode payloads for match values and views
//!
//! Every path ends in `rules::apply_move` / `rules::apply_draw` followed by
//! `rules::settle`.

pub mod coordinator;
pub mod error;
pub mod local;
pub mod snapshot;

pub use coordinator::{Coordinator, SessionId, SessionUpdate};
pub use error::SessionError;
pub use local::LocalGame;
