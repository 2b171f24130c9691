//! Game configuration and fixed rules
//!
//! Booster prices are tunable through a JSON config file; the rules that the
//! progression invariants depend on are constants.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Guesses allowed per level
pub const MAX_ATTEMPTS: usize = 6;

/// Most recent results kept in a profile
pub const HISTORY_CAPACITY: usize = 50;

/// Balance of a brand-new profile
pub const STARTING_COINS: u32 = 100;

/// Reward for a win scoring at least [`HIGH_SCORE_THRESHOLD`]
pub const HIGH_SCORE_REWARD: u32 = 20;

/// Reward for any other non-skipped win
pub const BASE_REWARD: u32 = 10;

pub const HIGH_SCORE_THRESHOLD: u32 = 50;

const APP_NAME: &str = "wordle_levels";

/// Score for a win on the given zero-based row
///
/// ```
/// use wordle_levels::config::score_for_row;
///
/// assert_eq!(score_for_row(0), 100);
/// assert_eq!(score_for_row(5), 50);
/// assert_eq!(score_for_row(12), 0);
/// ```
#[must_use]
pub fn score_for_row(row: u32) -> u32 {
    100u32.saturating_sub(row.saturating_mul(10))
}

/// Coins awarded for a non-skipped win with this score
#[must_use]
pub const fn reward_for_score(score: u32) -> u32 {
    if score >= HIGH_SCORE_THRESHOLD {
        HIGH_SCORE_REWARD
    } else {
        BASE_REWARD
    }
}

/// Coin price of each paid action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterCosts {
    pub dart: u32,
    pub hint: u32,
    pub skip: u32,
    pub retry: u32,
}

impl Default for BoosterCosts {
    fn default() -> Self {
        Self {
            dart: 10,
            hint: 15,
            skip: 25,
            retry: 35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub costs: BoosterCosts,
    /// Letters removed from the keyboard by one dart
    pub dart_letters: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            costs: BoosterCosts::default(),
            dart_letters: 3,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> io::Result<()>;
}

/// Config kept as a JSON file, platform config directory by default
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[must_use]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("wordle_levels.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return GameConfig::default();
        };
        match serde_json::from_slice::<GameConfig>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                GameConfig::default()
            }
        }
    }

    fn save(&self, cfg: &GameConfig) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(io::Error::other)?;
        fs::write(&self.path, data)
    }
}

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    #[must_use]
    pub fn profile_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().join("profile.json"))
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_costs() {
        let costs = BoosterCosts::default();
        assert_eq!((costs.dart, costs.hint, costs.skip, costs.retry), (10, 15, 25, 35));
    }

    #[test]
    fn rewards_follow_score_threshold() {
        assert_eq!(reward_for_score(100), 20);
        assert_eq!(reward_for_score(50), 20);
        assert_eq!(reward_for_score(40), 10);
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = GameConfig::default();
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = GameConfig {
            costs: BoosterCosts {
                dart: 1,
                hint: 2,
                skip: 3,
                retry: 4,
            },
            dart_letters: 5,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"costs":{"hint":99}}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.costs.hint, 99);
        assert_eq!(cfg.costs.dart, 10);
        assert_eq!(cfg.dart_letters, 3);
    }

    #[test]
    fn garbage_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), GameConfig::default());
    }
}
