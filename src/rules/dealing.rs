//! Shuffling, dealing, and choosing who opens.
//!
//! The only randomness in a match happens here, once per deal.

use crate::core::{
    generate_tile_set_with, EngineError, GameRng, MatchConfig, MatchState, Participant, Phase,
    Tile,
};

/// Hands and boneyard produced by one deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub hands: Vec<Vec<Tile>>,
    pub boneyard: Vec<Tile>,
}

/// Return a uniformly shuffled copy of `tiles`.
#[must_use]
pub fn shuffle(tiles: Vec<Tile>, rng: &mut GameRng) -> Vec<Tile> {
    let mut tiles = tiles;
    rng.shuffle(&mut tiles);
    tiles
}

/// Deal a fresh double-six set to `participant_count` participants.
///
/// ```
/// use domino_engine::core::GameRng;
/// use domino_engine::rules::deal;
///
/// let dealt = deal(4, &mut GameRng::new(7)).unwrap();
/// assert!(dealt.hands.iter().all(|h| h.len() == 7));
/// assert!(dealt.boneyard.is_empty());
/// assert!(deal(5, &mut GameRng::new(7)).is_err());
/// ```
pub fn deal(participant_count: usize, rng: &mut GameRng) -> Result<Deal, EngineError> {
    deal_with(&MatchConfig::default(), participant_count, rng)
}

/// Deal a fresh set described by `config`.
///
/// Hands are taken from the front of the shuffled sequence in seat order;
/// whatever is left becomes the boneyard.
pub fn deal_with(
    config: &MatchConfig,
    participant_count: usize,
    rng: &mut GameRng,
) -> Result<Deal, EngineError> {
    let max = config.participant_limit();
    if participant_count == 0 || participant_count > max {
        return Err(EngineError::InvalidParticipantCount { count: participant_count, min: 1, max });
    }

    let tiles = shuffle(generate_tile_set_with(config.max_pip), rng);
    let size = config.hand_size;
    let hands = (0..participant_count).map(|i| tiles[i * size..(i + 1) * size].to_vec()).collect();
    let boneyard = tiles[participant_count * size..].to_vec();

    Ok(Deal { hands, boneyard })
}

/// Seat index of whoever holds the highest double.
///
/// Falls back to seat 0 when nobody holds a double, or when the highest
/// double is held by more than one participant (only possible with a
/// corrupted or multi-set deal).
pub fn choose_starting_participant<'a>(
    participants: impl IntoIterator<Item = &'a Participant>,
) -> usize {
    let mut best: Option<(u8, usize)> = None;
    let mut contested = false;

    for (idx, participant) in participants.into_iter().enumerate() {
        let Some(top) = participant.hand.iter().filter(|t| t.is_double()).map(|t| t.left()).max()
        else {
            continue;
        };
        match best {
            Some((value, _)) if top < value => {}
            Some((value, _)) if top == value => contested = true,
            _ => {
                best = Some((top, idx));
                contested = false;
            }
        }
    }

    match best {
        Some((_, idx)) if !contested => idx,
        _ => 0,
    }
}

/// Deal a forming (or concluded, for a rematch) match and make it active.
///
/// Keeps the roster and seat order; resets hands, board, boneyard, pass
/// counter, winner and history.
pub fn start_match(
    state: &MatchState,
    config: &MatchConfig,
    rng: &mut GameRng,
) -> Result<MatchState, EngineError> {
    if state.phase == Phase::Active {
        return Err(EngineError::MatchInProgress);
    }

    let deal = deal_with(config, state.participant_count(), rng)?;

    let mut next = MatchState::new(state.id);
    next.participants = state
        .participants
        .iter()
        .zip(deal.hands)
        .map(|(p, hand)| Participant { score: 0, ..p.clone() }.with_hand(hand))
        .collect();
    next.boneyard = deal.boneyard.into();
    next.current_index = choose_starting_participant(next.participants.iter());
    next.phase = Phase::Active;
    Ok(next)
}
