use std::io::Write;

use mtgcore::{ConfigError, GameConfig, GameState, PlayerId, StateSummary};

#[test]
fn partial_config_keeps_defaults() {
    let config = GameConfig::from_json_str(
        r#"{ "starting_life": 40, "starting_hand_size": 10, "turn_limit": 12 }"#,
    )
    .expect("partial config parses");

    assert_eq!(config.starting_life, 40);
    assert_eq!(config.starting_hand_size, 10);
    assert_eq!(config.turn_limit, Some(12));
    assert_eq!(config.max_hand_size, 7);
    assert_eq!(config.land_plays_per_turn, 1);
    assert!(config.skip_first_draw);
    assert_eq!(config.seed, None);
}

#[test]
fn config_survives_json_round_trip() {
    let config = GameConfig {
        starting_life: 30,
        empty_pools_each_step: true,
        shuffle_libraries: false,
        seed: Some(99),
        max_rejected_actions: 2,
        ..GameConfig::default()
    };
    let json = config.to_json_string().expect("config serializes");
    assert_eq!(GameConfig::from_json_str(&json).expect("config parses"), config);
}

#[test]
fn malformed_config_is_a_parse_error() {
    let err = GameConfig::from_json_str(r#"{ "starting_life": "lots" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse config"));
}

#[test]
fn config_file_is_read_from_disk() {
    let path = std::env::temp_dir().join(format!("mtgcore-config-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(br#"{ "max_hand_size": 5 }"#).expect("write config");
    }
    let loaded = GameConfig::from_json_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.expect("file config parses").max_hand_size, 5);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = GameConfig::from_json_file("/nonexistent/mtgcore/config.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn config_drives_new_game_and_summary_serializes() {
    let config = GameConfig::from_json_str(r#"{ "starting_life": 25 }"#).expect("config parses");
    let game = GameState::new(vec!["Alice".to_string(), "Bob".to_string()], config);

    let summary = game.summary();
    assert_eq!(summary.life_of(PlayerId::from_index(1)), Some(25));

    let json = serde_json::to_string(&summary).expect("summary serializes");
    let back: StateSummary = serde_json::from_str(&json).expect("summary parses");
    assert_eq!(back, summary);
}
