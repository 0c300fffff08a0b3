use std::sync::Arc;

use mtgcore::game_loop::step;
use mtgcore::{
    AutoPassDecisionMaker, AutoPlayDecisionMaker, CardRegistry, DecisionRouter, GameConfig,
    GameLoopError, GameResult, GameState, LoopStep, PlayerId, Step, ZoneKind, run_game,
};

fn game(players: usize, config: GameConfig) -> GameState {
    let names = (0..players).map(|i| format!("Player {}", i + 1)).collect();
    GameState::new(names, config)
}

fn add_cards(game: &mut GameState, player: PlayerId, name: &str, count: usize) {
    let registry = CardRegistry::with_builtin_cards();
    let def = Arc::clone(registry.get(name).expect("builtin card"));
    for _ in 0..count {
        game.create_object_from_definition(&def, player, ZoneKind::Library).unwrap();
    }
}

fn red_green_deck(game: &mut GameState, player: PlayerId) {
    add_cards(game, player, "Mountain", 12);
    add_cards(game, player, "Forest", 12);
    add_cards(game, player, "Lightning Bolt", 18);
    add_cards(game, player, "Grizzly Bears", 18);
}

fn white_deck(game: &mut GameState, player: PlayerId) {
    add_cards(game, player, "Plains", 24);
    add_cards(game, player, "Savannah Lions", 36);
}

fn auto_play_game(seed: u64) -> (GameState, GameResult) {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut game = game(2, config);
    red_green_deck(&mut game, PlayerId::from_index(0));
    white_deck(&mut game, PlayerId::from_index(1));
    game.start_game();

    let mut dm = DecisionRouter::new(Box::new(AutoPlayDecisionMaker));
    let result = run_game(&mut game, &mut dm).expect("game runs to completion");
    (game, result)
}

#[test]
fn auto_play_game_finishes_with_consistent_zones() {
    let (game, result) = auto_play_game(7);

    assert!(game.is_game_over());
    assert_eq!(game.result.as_ref(), Some(&result));
    assert!(game.validate_zone_consistency().is_ok());
    match result {
        GameResult::Winner(winner) => {
            for player in &game.players {
                assert_eq!(player.has_lost, player.id != winner);
            }
        }
        GameResult::Draw => assert!(game.players.iter().all(|p| p.has_lost)),
        GameResult::Remaining(_) => panic!("no turn limit was set"),
    }
}

#[test]
fn same_seed_plays_the_same_game() {
    let (first, first_result) = auto_play_game(42);
    let (second, second_result) = auto_play_game(42);

    assert_eq!(first_result, second_result);
    assert_eq!(first.turn.turn_number, second.turn.turn_number);
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn turn_limit_reports_remaining_players() {
    let config = GameConfig {
        seed: Some(3),
        turn_limit: Some(4),
        ..GameConfig::default()
    };
    let mut game = game(3, config);
    for index in 0..3 {
        white_deck(&mut game, PlayerId::from_index(index));
    }
    game.start_game();

    let mut dm = AutoPassDecisionMaker;
    let result = run_game(&mut game, &mut dm).expect("game stops at the limit");

    assert_eq!(
        result,
        GameResult::Remaining(vec![
            PlayerId::from_index(0),
            PlayerId::from_index(1),
            PlayerId::from_index(2),
        ])
    );
    assert_eq!(game.turn.turn_number, 5);
}

#[test]
fn second_player_decks_out_first() {
    let config = GameConfig {
        shuffle_libraries: false,
        seed: Some(0),
        ..GameConfig::default()
    };
    let mut game = game(2, config);
    let alice = PlayerId::from_index(0);
    let bob = PlayerId::from_index(1);
    add_cards(&mut game, alice, "Forest", 10);
    add_cards(&mut game, bob, "Forest", 10);
    game.start_game();

    let mut dm = AutoPassDecisionMaker;
    let result = run_game(&mut game, &mut dm).expect("game ends by decking");

    // Alice skips her first draw, so Bob runs out one draw sooner.
    assert_eq!(result, GameResult::Winner(alice));
    assert!(game.player(bob).is_some_and(|p| p.has_lost));
    assert_eq!(game.turn.active_player, bob);
}

#[test]
fn finished_game_cannot_be_run_again() {
    let (mut game, _) = auto_play_game(11);
    let mut dm = AutoPassDecisionMaker;

    assert!(matches!(
        run_game(&mut game, &mut dm),
        Err(GameLoopError::GameOver)
    ));
    assert!(matches!(step(&mut game, &mut dm), Ok(LoopStep::GameOver(_))));
}

#[test]
fn untap_step_advances_without_priority() {
    let mut game = game(2, GameConfig::default());
    add_cards(&mut game, PlayerId::from_index(0), "Island", 20);
    add_cards(&mut game, PlayerId::from_index(1), "Island", 20);
    game.start_game();
    assert_eq!(game.turn.step, Some(Step::Untap));
    assert_eq!(game.priority.holder(), None);

    let mut dm = AutoPassDecisionMaker;
    let outcome = step(&mut game, &mut dm).expect("first step");

    assert_eq!(outcome, LoopStep::Advanced);
    assert_eq!(game.turn.step, Some(Step::Upkeep));
}
