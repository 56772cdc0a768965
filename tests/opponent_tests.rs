//! Automated opponents playing whole matches.

use std::time::{Duration, Instant};

use domino_engine::core::{
    GameRng, MatchConfig, MatchId, MatchState, MoveKind, Participant, ParticipantId,
};
use domino_engine::opponent::{Difficulty, GreedyOpponent, OpponentPolicy, RandomOpponent};
use domino_engine::rules::{apply_move, settle, start_match};
use domino_engine::session::LocalGame;

fn all_bots(count: usize, seed: u64) -> MatchState {
    let mut forming = MatchState::new(MatchId(seed));
    for i in 0..count {
        let id = ParticipantId::new(i as u32 + 1);
        forming = forming.with_participant(Participant::automated(id, format!("bot {i}")));
    }
    start_match(&forming, &MatchConfig::default(), &mut GameRng::new(seed)).unwrap()
}

fn run(mut state: MatchState, policies: &[&dyn OpponentPolicy], seed: u64) -> MatchState {
    let mut rng = GameRng::new(seed);
    while let Some(current) = state.current_participant().map(|p| p.id) {
        let seat = state.index_of(current).unwrap();
        let mv = policies[seat].choose(&state, current, &mut rng).unwrap();
        state = settle(&apply_move(&state, &mv).expect("policies only choose legal moves"));
    }
    state
}

#[test]
fn test_policies_finish_every_table_size() {
    for count in 2..=4 {
        for seed in 0..25 {
            let policies: Vec<&dyn OpponentPolicy> = (0..count)
                .map(|i| -> &dyn OpponentPolicy {
                    if i % 2 == 0 {
                        &RandomOpponent
                    } else {
                        &GreedyOpponent
                    }
                })
                .collect();
            let done = run(all_bots(count, seed), &policies, seed);
            assert!(done.is_terminal());
            assert!(done.winner().is_some());
        }
    }
}

#[test]
fn test_greedy_is_deterministic() {
    let policies: [&dyn OpponentPolicy; 2] = [&GreedyOpponent, &GreedyOpponent];
    let a = run(all_bots(2, 5), &policies, 1);
    let b = run(all_bots(2, 5), &policies, 999);
    assert_eq!(a, b);
}

#[test]
fn test_greedy_holds_its_own_against_random() {
    let mut greedy_wins = 0;
    let mut random_wins = 0;
    for seed in 0..200 {
        let state = all_bots(2, seed);
        let policies: [&dyn OpponentPolicy; 2] = [&GreedyOpponent, &RandomOpponent];
        let done = run(state, &policies, seed);
        match done.winner() {
            Some(w) if w == ParticipantId::new(1) => greedy_wins += 1,
            Some(_) => random_wins += 1,
            None => {}
        }
    }
    assert_eq!(greedy_wins + random_wins, 200);
    assert!(greedy_wins > 60, "greedy won only {greedy_wins} of 200");
}

#[test]
fn test_local_game_with_delay_plays_out() {
    let config = MatchConfig::default().with_thinking_delay_ms(50);
    let mut game =
        LocalGame::new(config, "ana", &[Difficulty::Hard, Difficulty::Easy, Difficulty::Easy], 3)
            .unwrap();
    let mut now = Instant::now();

    for _ in 0..2000 {
        if game.state().is_terminal() {
            break;
        }
        if game.awaiting_opponent() {
            game.tick(now).unwrap();
            now += Duration::from_millis(25);
            continue;
        }
        let human = game.human();
        let view = game.view();
        let legal = domino_engine::rules::valid_moves(&view.hand, view.ends);
        let kind = match legal.first() {
            Some(m) => MoveKind::Place { tile: m.tile.id(), side: m.side },
            None if view.boneyard_size == 0 => MoveKind::Pass,
            None => MoveKind::Draw,
        };
        assert_eq!(game.state().current_participant().unwrap().id, human);
        game.play(kind).unwrap();
    }
    assert!(game.state().is_terminal());
}
