//! Automated-opponent policies.
//!
//! A policy only reads the match through `valid_moves_for` and pip sums and
//! hands back a `Move`; the caller submits it through `apply_move` like any
//! other participant's move.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MatchState, Move, ParticipantId};
use crate::rules::{valid_moves_for, ValidMove};

// =============================================================================
// Policy trait
// =============================================================================

/// Chooses a move for an automated participant.
pub trait OpponentPolicy: Send + Sync {
    /// Choose a move for `participant`.
    ///
    /// Returns `None` if the match is not active or it is not their turn.
    /// Otherwise always returns something the engine will accept: a legal
    /// placement, a draw when nothing fits and the boneyard has tiles, or a
    /// pass.
    fn choose(&self, state: &MatchState, participant: ParticipantId, rng: &mut GameRng)
        -> Option<Move>;
}

/// Draw or pass, whichever the rules allow when nothing can be placed.
fn fallback(state: &MatchState, participant: ParticipantId) -> Move {
    if state.boneyard().is_empty() {
        Move::pass(participant)
    } else {
        Move::draw(participant)
    }
}

fn on_turn(state: &MatchState, participant: ParticipantId) -> bool {
    state.current_participant().is_some_and(|p| p.id == participant)
}

fn to_move(participant: ParticipantId, chosen: ValidMove) -> Move {
    Move::place(participant, chosen.tile.id(), chosen.side)
}

// =============================================================================
// Random
// =============================================================================

/// Uniform over the legal placements.
#[derive(Clone, Debug, Default)]
pub struct RandomOpponent;

impl OpponentPolicy for RandomOpponent {
    fn choose(
        &self,
        state: &MatchState,
        participant: ParticipantId,
        rng: &mut GameRng,
    ) -> Option<Move> {
        if !on_turn(state, participant) {
            return None;
        }
        let moves = valid_moves_for(state, participant);
        match rng.choose(&moves) {
            Some(&chosen) => Some(to_move(participant, chosen)),
            None => Some(fallback(state, participant)),
        }
    }
}

// =============================================================================
// Greedy
// =============================================================================

/// Sheds the heaviest tile it can.
///
/// Ties on pip sum prefer doubles, then the first candidate in hand order. Deterministic: never touches the RNG.
#[derive(Clone, Debug, Default)]
pub struct GreedyOpponent;

impl GreedyOpponent {
    fn rank(candidate: &ValidMove) -> (u32, bool) {
        (candidate.tile.pip_sum(), candidate.tile.is_double())
    }
}

impl OpponentPolicy for GreedyOpponent {
    fn choose(
        &self,
        state: &MatchState,
        participant: ParticipantId,
        _rng: &mut GameRng,
    ) -> Option<Move> {
        if !on_turn(state, participant) {
            return None;
        }
        let moves = valid_moves_for(state, participant);
        let mut best: Option<&ValidMove> = None;
        for candidate in &moves {
            if best.map_or(true, |b| Self::rank(candidate) > Self::rank(b)) {
                best = Some(candidate);
            }
        }
        Some(match best {
            Some(&chosen) => to_move(participant, chosen),
            None => fallback(state, participant),
        })
    }
}

// =============================================================================
// Difficulty
// =============================================================================

/// Difficulty tiers offered for automated seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// The policy that plays at this tier.
    #[must_use]
    pub fn policy(self) -> Box<dyn OpponentPolicy> {
        match self {
            Difficulty::Easy => Box::new(RandomOpponent),
            Difficulty::Hard => Box::new(GreedyOpponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchId, MoveKind, Participant, Side, Tile, TileId};
    use crate::rules::apply_move;

    const BOT: ParticipantId = ParticipantId::new(1);
    const HUMAN: ParticipantId = ParticipantId::new(2);

    fn table(bot: &[(u8, u8)], boneyard: &[(u8, u8)]) -> MatchState {
        let bot = Participant::automated(BOT, "bot")
            .with_hand(bot.iter().map(|&(a, b)| Tile::new(a, b)));
        let human = Participant::new(HUMAN, "ana").with_hand([Tile::new(0, 1), Tile::new(6, 6)]);
        let boneyard = boneyard.iter().map(|&(a, b)| Tile::new(a, b)).collect();
        MatchState::in_progress(MatchId(1), vec![bot, human], boneyard, 0).unwrap()
    }

    #[test]
    fn test_not_on_turn() {
        let state = table(&[(1, 2)], &[]);
        let mut rng = GameRng::new(1);
        assert_eq!(RandomOpponent.choose(&state, HUMAN, &mut rng), None);
        assert_eq!(GreedyOpponent.choose(&state, HUMAN, &mut rng), None);
    }

    #[test]
    fn test_greedy_prefers_heaviest_then_double() {
        let state = table(&[(1, 2), (3, 3), (2, 4), (0, 5)], &[]);
        let mv = GreedyOpponent.choose(&state, BOT, &mut GameRng::new(1)).unwrap();
        // [3|3] and [2|4] both sum to 6; the double wins.
        assert_eq!(mv.kind, MoveKind::Place { tile: TileId::new(3, 3), side: Side::Left });
    }

    #[test]
    fn test_random_choice_is_always_legal() {
        let state = table(&[(1, 2), (3, 3), (2, 4), (0, 5)], &[]);
        let mut rng = GameRng::new(9);
        for _ in 0..20 {
            let mv = RandomOpponent.choose(&state, BOT, &mut rng).unwrap();
            assert!(apply_move(&state, &mv).is_ok());
        }
    }

    #[test]
    fn test_fallbacks() {
        let opened = table(&[(6, 5), (1, 1)], &[(2, 2)]);
        let opened = apply_move(&opened, &Move::place(BOT, TileId::new(5, 6), Side::Left)).unwrap();
        let opened =
            apply_move(&opened, &Move::place(HUMAN, TileId::new(6, 6), Side::Left)).unwrap();

        let mut rng = GameRng::new(3);
        assert_eq!(GreedyOpponent.choose(&opened, BOT, &mut rng), Some(Move::draw(BOT)));
        assert_eq!(RandomOpponent.choose(&opened, BOT, &mut rng), Some(Move::draw(BOT)));

        let drawn = apply_move(&opened, &Move::draw(BOT)).unwrap();
        // [2|2] does not fit either; the turn moved on.
        assert_eq!(drawn.current_participant().map(|p| p.id), Some(HUMAN));
    }

    #[test]
    fn test_pass_when_boneyard_empty() {
        let state = table(&[(6, 5), (1, 1)], &[]);
        let state = apply_move(&state, &Move::place(BOT, TileId::new(5, 6), Side::Left)).unwrap();
        let state = apply_move(&state, &Move::place(HUMAN, TileId::new(6, 6), Side::Left)).unwrap();
        let mv = GreedyOpponent.choose(&state, BOT, &mut GameRng::new(1)).unwrap();
        assert_eq!(mv, Move::pass(BOT));
    }

    #[test]
    fn test_difficulty_policies() {
        let state = table(&[(1, 2), (3, 3), (2, 4)], &[]);
        let mv = Difficulty::Hard.policy().choose(&state, BOT, &mut GameRng::new(1));
        assert_eq!(
            mv.map(|m| m.kind),
            Some(MoveKind::Place { tile: TileId::new(3, 3), side: Side::Left })
        );
        assert!(Difficulty::Easy.policy().choose(&state, BOT, &mut GameRng::new(1)).is_some());
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }
}
