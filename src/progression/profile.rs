//! Durable player record
//!
//! The serialized field names (`currentLevel`, `gameHistory`, `isWon`, ...) are
//! the on-disk contract; durations are stored as integer milliseconds.

use crate::config::{HISTORY_CAPACITY, STARTING_COINS, reward_for_score};
use crate::game::SessionOutcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Shortest time a win can set as the record
const MIN_RECORD_TIME: Duration = Duration::from_millis(1);

/// Outcome of one finished level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub level: u32,
    #[serde(rename = "isWon")]
    pub won: bool,
    /// Zero-based row of the final attempt
    pub attempts: u32,
    #[serde(with = "millis")]
    pub completion_time: Duration,
    pub score: u32,
    /// Completed by the skip booster
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
}

/// Cross-level player state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub current_level: u32,
    pub coins: u32,
    pub max_level: u32,
    pub max_score: u32,
    /// Fastest win, `None` until the first non-skipped win
    #[serde(with = "millis::option")]
    pub max_time: Option<Duration>,
    /// Most recent first, at most [`HISTORY_CAPACITY`] entries
    #[serde(rename = "gameHistory")]
    pub history: VecDeque<GameResult>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            current_level: 1,
            coins: STARTING_COINS,
            max_level: 1,
            max_score: 0,
            max_time: None,
            history: VecDeque::new(),
        }
    }
}

impl Profile {
    /// Fold a finished level into the profile
    ///
    /// Wins advance `current_level`. Only non-skipped wins pay coins and can
    /// improve the level, score and time records.
    pub fn record(&mut self, outcome: &SessionOutcome) {
        let result = &outcome.result;

        self.history.push_front(result.clone());
        self.history.truncate(HISTORY_CAPACITY);

        if !result.won {
            return;
        }

        self.current_level = outcome.level.saturating_add(1);

        if outcome.skipped {
            return;
        }

        self.coins = self.coins.saturating_add(reward_for_score(result.score));
        self.max_level = self.max_level.max(outcome.level);
        self.max_score = self.max_score.max(result.score);
        // A zero time would read back as "no record"
        let time = result.completion_time.max(MIN_RECORD_TIME);
        self.max_time = Some(self.max_time.map_or(time, |best| best.min(time)));
    }

    /// Bring a loaded profile back within its invariants
    ///
    /// Levels are at least 1 and history holds at most [`HISTORY_CAPACITY`]
    /// entries. Returns `true` if anything had to change.
    pub fn repair(&mut self) -> bool {
        let before = (self.current_level, self.max_level, self.history.len());
        self.current_level = self.current_level.max(1);
        self.max_level = self.max_level.max(1);
        self.history.truncate(HISTORY_CAPACITY);
        before != (self.current_level, self.max_level, self.history.len())
    }

    #[must_use]
    pub fn games_played(&self) -> usize {
        self.history.len()
    }

    /// Percentage of recorded games that were won, rounded
    #[must_use]
    pub fn win_rate(&self) -> u32 {
        if self.history.is_empty() {
            return 0;
        }
        let wins = self.history.iter().filter(|g| g.won).count();
        ((wins as f64 / self.history.len() as f64) * 100.0).round() as u32
    }

    /// Mean number of guesses over non-skipped wins
    #[must_use]
    pub fn average_attempts(&self) -> Option<f64> {
        let (count, total) = self
            .history
            .iter()
            .filter(|g| g.won && !g.skipped)
            .fold((0u32, 0u32), |(n, sum), g| (n + 1, sum + g.attempts + 1));
        (count > 0).then(|| f64::from(total) / f64::from(count))
    }
}

/// Serde adapters storing `Duration` as integer milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    fn to_millis(d: &Duration) -> u64 {
        u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(to_millis(d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
            match d {
                Some(d) => s.serialize_some(&to_millis(d)),
                None => s.serialize_none(),
            }
        }

        /// `0` is read as "no record" for files written before `null` was used
        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
            let ms = Option::<u64>::deserialize(d)?;
            Ok(ms.filter(|&ms| ms > 0).map(Duration::from_millis))
        }
    }
}
