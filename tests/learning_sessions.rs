//! Session-level learning behaviour

use qtictactoe::{
    BoardState, Cell, GameOutcome, Player, Ply,
    adapters::InMemoryRepository,
    app::{EngineConfig, HUMAN, HumanGame, MACHINE, Session},
    value_table::PolicyEngine,
};

fn session(repo: &InMemoryRepository, seed: u64) -> Session {
    let config = EngineConfig::new("model_weights.json").with_seed(seed);
    Session::open_with(&config, Box::new(repo.clone()))
}

#[test]
fn test_same_seed_same_games() {
    let a = session(&InMemoryRepository::new(), 99).play_self_game().unwrap();
    let b = session(&InMemoryRepository::new(), 99).play_self_game().unwrap();
    assert_eq!(a.moves, b.moves);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn test_values_stay_in_unit_interval() {
    let repo = InMemoryRepository::new();
    let mut s = session(&repo, 5);
    s.run_self_play(200, |_| {}).unwrap();

    let table = s.table();
    for ply in Ply::all() {
        for actions in table.bucket(ply).unwrap().values() {
            for record in actions.values() {
                assert!(
                    (0.0..=1.0).contains(&record.value),
                    "value {} out of range at ply {ply}",
                    record.value
                );
            }
        }
    }
}

#[test]
fn test_revisit_keeps_learned_values() {
    let repo = InMemoryRepository::new();
    let mut s = session(&repo, 6);
    s.run_self_play(50, |_| {}).unwrap();

    let empty = BoardState::new();
    let before = s.table().ranked_actions(&empty);
    s.select_action(&empty, Player::O).unwrap();
    assert_eq!(s.table().ranked_actions(&empty), before);
}

#[test]
fn test_learned_table_carries_into_next_session() {
    let repo = InMemoryRepository::new();
    let states = {
        let mut s = session(&repo, 7);
        s.run_self_play(30, |_| {}).unwrap();
        s.table().state_count()
    };

    let mut next = session(&repo, 8);
    assert_eq!(next.table().state_count(), states);
    next.play_self_game().unwrap();
    assert!(next.table().state_count() >= states);
}

#[test]
fn test_human_win_is_a_loss_for_the_machine() {
    let repo = InMemoryRepository::new();
    let mut s = session(&repo, 9);

    // Human X starts and keeps choosing along the top row when free.
    let (mut game, _) = HumanGame::start_with(&mut s, HUMAN).unwrap();
    let mut last = None;
    while !game.is_over() {
        let cell = [Cell::UpperLeft, Cell::UpperMiddle, Cell::UpperRight]
            .into_iter()
            .chain(game.state().empty_cells())
            .find(|&c| game.state().is_empty(c))
            .unwrap();
        last = Some(game.human_move(&mut s, cell).unwrap());
    }

    let turn = last.unwrap();
    let report = turn.backup.unwrap();
    match turn.outcome.unwrap() {
        GameOutcome::Win(p) if p == HUMAN => {
            assert!(turn.machine_move.is_none());
            let worst = s
                .table()
                .bucket(report.terminal_ply)
                .unwrap()
                .values()
                .flat_map(|actions| actions.values())
                .any(|record| record.value == 0.0);
            assert!(worst);
        }
        GameOutcome::Win(p) => assert_eq!(p, MACHINE),
        GameOutcome::Draw => {}
    }
    assert_eq!(repo.count(), 1);
}

#[test]
fn test_engine_prefers_trained_winning_move() {
    let repo = InMemoryRepository::new();
    let mut s = session(&repo, 10);
    s.run_self_play(300, |_| {}).unwrap();

    // A sampled engine follows the table, so high-value actions dominate.
    let empty = BoardState::new();
    let ranked = s.table().ranked_actions(&empty);
    assert_eq!(ranked.len(), 9);
    assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));

    let mut table = s.table().clone();
    let mut engine = PolicyEngine::new().with_seed(1);
    let best = ranked[0].0;
    let hits = (0..200)
        .filter(|_| engine.select_action(&mut table, &empty).unwrap() == best)
        .count();
    assert!(hits > 0);
}
