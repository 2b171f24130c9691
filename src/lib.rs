//! Wordle Levels
//!
//! Level-based Wordle: guess a five-letter word in six tries, earn coins for
//! wins, and spend them on boosters. Progress is kept in a profile that is
//! saved after every change.
//!
//! # Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wordle_levels::config::GameConfig;
//! use wordle_levels::game::{Game, SessionStatus};
//! use wordle_levels::progression::{MemoryProfileStorage, ProgressionStore};
//! use wordle_levels::wordlists::WordList;
//!
//! let words = WordList::from_slices(&["speed"], &["crane"]).unwrap();
//! let store = ProgressionStore::open(MemoryProfileStorage::new()).unwrap();
//! let mut game = Game::new(&words, StdRng::seed_from_u64(1), GameConfig::default(), store);
//!
//! game.start_level();
//! let report = game.guess("speed").unwrap();
//! assert_eq!(report.status, SessionStatus::Won);
//! assert_eq!(game.profile().coins, 120);
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod wordlists;

// Level play and boosters
pub mod game;

// Durable player profile
pub mod progression;

// Booster prices and fixed rules
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
