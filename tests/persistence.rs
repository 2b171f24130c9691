//! Profiles survive a restart through the file backend

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wordle_levels::config::GameConfig;
use wordle_levels::game::Game;
use wordle_levels::progression::{
    FileProfileStorage, PersistenceError, ProfileStorage, ProgressionStore,
};
use wordle_levels::wordlists::WordList;

fn words() -> WordList {
    WordList::from_slices(&["speed"], &["crane"]).unwrap()
}

#[test]
fn progress_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let words = words();

    {
        let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
        let mut game = Game::new(&words, StdRng::seed_from_u64(1), GameConfig::default(), store);
        game.start_level();
        game.use_dart().unwrap();
        game.guess("crane").unwrap();
        game.guess("speed").unwrap();
    }

    let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
    let profile = store.profile();
    assert_eq!(profile.current_level, 2);
    assert_eq!(profile.coins, 100 - 10 + 20);
    assert_eq!(profile.max_score, 90);
    assert_eq!(profile.history.len(), 1);
    assert!(profile.max_time.is_some());
}

#[test]
fn saved_json_uses_profile_field_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("profile.json");
    let words = words();

    let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
    let mut game = Game::new(&words, StdRng::seed_from_u64(2), GameConfig::default(), store);
    game.start_level();
    game.guess("speed").unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["currentLevel"], 2);
    assert_eq!(json["coins"], 120);
    assert_eq!(json["maxLevel"], 1);
    assert_eq!(json["gameHistory"][0]["isWon"], true);
    assert_eq!(json["gameHistory"][0]["attempts"], 0);
    assert!(json["gameHistory"][0].get("skipped").is_none());
}

#[test]
fn legacy_profile_without_new_fields_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(
        &path,
        r#"{"currentLevel":7,"coins":55,"maxLevel":6,"maxScore":90,"maxTime":0,
            "gameHistory":[{"level":6,"isWon":true,"attempts":1,"completionTime":4200,"score":90}]}"#,
    )
    .unwrap();

    let profile = FileProfileStorage::with_path(&path).load().unwrap().unwrap();
    assert_eq!(profile.current_level, 7);
    assert_eq!(profile.max_time, None);
    assert_eq!(profile.history[0].completion_time, Duration::from_millis(4200));
    assert!(!profile.history[0].skipped);
}

#[test]
fn corrupt_profile_is_reported_not_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ProgressionStore::open(FileProfileStorage::with_path(&path)).err();
    assert!(matches!(err, Some(PersistenceError::Serialization(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn instant_win_keeps_its_record_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let words = words();

    {
        let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
        let mut game = Game::new(&words, StdRng::seed_from_u64(3), GameConfig::default(), store);
        game.start_level();
        game.guess("speed").unwrap();
        assert!(game.profile().max_time.is_some());
    }

    let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
    let max_time = store.profile().max_time.unwrap();
    assert!(max_time >= Duration::from_millis(1));
    assert_eq!(store.profile().max_score, 100);
}

#[test]
fn out_of_range_profile_is_repaired_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let entry = r#"{"level":3,"isWon":false,"attempts":5,"completionTime":9000,"score":0}"#;
    let history = vec![entry; 60].join(",");
    fs::write(
        &path,
        format!(r#"{{"currentLevel":0,"maxLevel":0,"gameHistory":[{history}]}}"#),
    )
    .unwrap();

    let words = words();
    let store = ProgressionStore::open(FileProfileStorage::with_path(&path)).unwrap();
    assert_eq!(store.profile().current_level, 1);
    assert_eq!(store.profile().max_level, 1);
    assert_eq!(store.profile().history.len(), 50);

    let mut game = Game::new(&words, StdRng::seed_from_u64(4), GameConfig::default(), store);
    assert_eq!(game.start_level().level(), 1);
}
