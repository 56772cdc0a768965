//! Automated opponents.
//!
//! Policies are trait-based so the local loop and the coordinator can seat
//! any mix of them:
//! - `RandomOpponent`: uniform over legal placements
//! - `GreedyOpponent`: heaviest tile first
//!
//! `Difficulty` maps a user-facing tier to a boxed policy.

pub mod policy;

pub use policy::{Difficulty, GreedyOpponent, OpponentPolicy, RandomOpponent};
