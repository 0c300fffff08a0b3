//! mtgcore - automated game runner
//!
//! Plays a game between automated players with two-color starter decks and
//! prints the result.
//!
//! ## Usage
//!
//! ```text
//! mtgcore [OPTIONS]
//!
//! Options:
//!   --players <n>      Number of players (default 2)
//!   --turns <n>        Stop after this many turns
//!   --seed <n>         Seed the shuffles
//!   --config <file>    Load a JSON GameConfig; --turns/--seed override it
//! ```
//!
//! Log output follows `RUST_LOG` (default `info`).

use std::env;
use std::process;
use std::sync::Arc;

use mtgcore::{
    AutoPlayDecisionMaker, CardDefinition, CardRegistry, DecisionRouter, GameConfig, GameResult,
    GameState, PlayerId, ZoneKind, run_game,
};
use tracing_subscriber::EnvFilter;

const PLAYER_NAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dave", "Erin", "Frank"];

/// A 60-card deck: two basic lands and its spells, with counts.
struct StarterDeck {
    name: &'static str,
    lands: [(&'static str, usize); 2],
    spells: &'static [(&'static str, usize)],
}

const STARTER_DECKS: [StarterDeck; 3] = [
    StarterDeck {
        name: "Selesnya",
        lands: [("Plains", 12), ("Forest", 12)],
        spells: &[("Savannah Lions", 18), ("Grizzly Bears", 18)],
    },
    StarterDeck {
        name: "Gruul",
        lands: [("Mountain", 12), ("Forest", 12)],
        spells: &[("Lightning Bolt", 14), ("Forked Bolt", 8), ("Grizzly Bears", 14)],
    },
    StarterDeck {
        name: "Boros",
        lands: [("Mountain", 12), ("Plains", 12)],
        spells: &[("Lightning Bolt", 12), ("Forked Bolt", 6), ("Savannah Lions", 18)],
    },
];

struct CliArgs {
    players: usize,
    turns: Option<u32>,
    seed: Option<u64>,
    config: Option<String>,
}

fn print_help() {
    println!("mtgcore - automated MTG rules engine game");
    println!();
    println!("Usage: mtgcore [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --players <n>      Number of players, 1 to {} (default 2)", PLAYER_NAMES.len());
    println!("  --turns <n>        Stop after this many turns");
    println!("  --seed <n>         Seed the shuffles for a repeatable game");
    println!("  --config <file>    Load a JSON GameConfig (--turns/--seed override it)");
    println!("  --help, -h         Show this help message");
    println!();
    println!("Set RUST_LOG (for example RUST_LOG=mtgcore=debug) for more detail.");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {}: '{}'", flag, value))
}

/// Parse command-line arguments.
fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = CliArgs {
        players: 2,
        turns: None,
        seed: None,
        config: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                parsed.players = parse_value("--players", args.get(i + 1))?;
                i += 2;
            }
            "--turns" => {
                parsed.turns = Some(parse_value("--turns", args.get(i + 1))?);
                i += 2;
            }
            "--seed" => {
                parsed.seed = Some(parse_value("--seed", args.get(i + 1))?);
                i += 2;
            }
            "--config" => {
                parsed.config = Some(parse_value("--config", args.get(i + 1))?);
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    if parsed.players == 0 || parsed.players > PLAYER_NAMES.len() {
        return Err(format!(
            "--players must be between 1 and {}",
            PLAYER_NAMES.len()
        ));
    }
    Ok(parsed)
}

fn load_config(args: &CliArgs) -> Result<GameConfig, String> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => GameConfig::default(),
    };
    if args.turns.is_some() {
        config.turn_limit = args.turns;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn lookup(registry: &CardRegistry, name: &str) -> Result<Arc<CardDefinition>, String> {
    registry
        .get(name)
        .cloned()
        .ok_or_else(|| format!("Card not found: '{}'", name))
}

/// Puts a starter deck into `player`'s library. `start_game` shuffles it.
fn load_deck(
    game: &mut GameState,
    registry: &CardRegistry,
    player: PlayerId,
    deck: &StarterDeck,
) -> Result<(), String> {
    for &(name, count) in deck.lands.iter().chain(deck.spells.iter()) {
        let def = lookup(registry, name)?;
        for _ in 0..count {
            game.create_object_from_definition(&def, player, ZoneKind::Library)
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn describe(game: &GameState, result: &GameResult) -> String {
    let name = |id: PlayerId| {
        game.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    match result {
        GameResult::Winner(id) => format!("{} wins", name(*id)),
        GameResult::Draw => "Draw".to_string(),
        GameResult::Remaining(ids) => {
            let names: Vec<String> = ids.iter().map(|&id| name(id)).collect();
            format!("Stopped with {} still in the game", names.join(", "))
        }
    }
}

fn run(args: CliArgs) -> Result<(), String> {
    let config = load_config(&args)?;
    let registry = CardRegistry::with_builtin_cards();

    let names: Vec<String> = PLAYER_NAMES[..args.players]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut game = GameState::new(names, config);

    for index in 0..args.players {
        let player = PlayerId::from_index(index as u8);
        let deck = &STARTER_DECKS[index % STARTER_DECKS.len()];
        load_deck(&mut game, &registry, player, deck)?;
        println!("{} plays {} (60 cards)", PLAYER_NAMES[index], deck.name);
    }
    println!();

    game.start_game();
    let mut decision_maker = DecisionRouter::new(Box::new(AutoPlayDecisionMaker));
    let result = run_game(&mut game, &mut decision_maker).map_err(|e| e.to_string())?;

    println!("========================================");
    println!("  {} after {} turns", describe(&game, &result), game.turn.turn_number);
    println!("========================================");
    for player in &game.players {
        println!(
            "  {:<6} life {:>3}  hand {:>2}  library {:>2}{}",
            player.name,
            player.life,
            player.hand_size(),
            player.library_size(),
            if player.has_lost { "  (lost)" } else { "" }
        );
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = parse_args().and_then(run);
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
