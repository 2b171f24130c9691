//! Paid assistance actions
//!
//! Each booster checks every precondition before touching anything, then
//! applies its effect and returns the reduced balance. A failed call leaves
//! both the session and the balance exactly as they were.

use super::GameError;
use super::session::{Session, SessionOutcome, SessionStatus};
use crate::core::{Feedback, WORD_LENGTH};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoosterKind {
    /// Remove wrong letters from the keyboard
    Dart,
    /// Reveal and lock one position
    Hint,
    /// Complete the level without a reward
    Skip,
}

impl BoosterKind {
    pub const ALL: [Self; 3] = [Self::Dart, Self::Hint, Self::Skip];

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Dart => "remove letters that are not in the word",
            Self::Hint => "reveal one correct letter",
            Self::Skip => "skip this level (no coin reward)",
        }
    }
}

impl fmt::Display for BoosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dart => "Dart",
            Self::Hint => "Hint",
            Self::Skip => "Skip",
        };
        f.write_str(name)
    }
}

/// A booster's effect plus the balance left after paying for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spent<T> {
    pub effect: T,
    pub coins: u32,
}

/// Position and letter revealed by a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintReveal {
    pub position: usize,
    pub letter: char,
}

/// Disable up to `count` letters that do not occur in the target
///
/// Candidates are drawn uniformly without replacement. Fewer than `count`
/// eligible letters is not an error: all remaining ones are taken.
///
/// # Errors
/// `InsufficientFunds` if `coins < cost`.
pub fn apply_dart(
    session: &mut Session,
    coins: u32,
    cost: u32,
    count: usize,
    rng: &mut dyn RngCore,
) -> Result<Spent<Vec<char>>, GameError> {
    let remaining = GameError::ensure_funds(coins, cost)?;

    let eligible: Vec<char> = ('A'..='Z')
        .filter(|&l| !session.target.has_letter(l) && !session.disabled_letters.contains(&l))
        .collect();

    let mut chosen: Vec<char> = eligible.choose_multiple(rng, count).copied().collect();
    chosen.sort_unstable();
    session.disabled_letters.extend(chosen.iter().copied());

    debug!(letters = ?chosen, coins = remaining, "dart applied");
    Ok(Spent {
        effect: chosen,
        coins: remaining,
    })
}

/// Lock a random unlocked position and pre-fill it with the target's letter
///
/// # Errors
/// `InsufficientFunds` if `coins < cost`, `NoAvailablePosition` if all five
/// positions are already locked.
pub fn apply_hint(
    session: &mut Session,
    coins: u32,
    cost: u32,
    rng: &mut dyn RngCore,
) -> Result<Spent<HintReveal>, GameError> {
    let remaining = GameError::ensure_funds(coins, cost)?;

    let unlocked: Vec<usize> = (0..WORD_LENGTH)
        .filter(|i| !session.locked_positions.contains(i))
        .collect();
    if unlocked.is_empty() {
        return Err(GameError::NoAvailablePosition);
    }

    let position = unlocked[rng.random_range(0..unlocked.len())];
    let letter = session.target.letter_at(position);
    session.locked_positions.insert(position);
    session.buffer.set(position, letter);

    debug!(position, %letter, coins = remaining, "hint applied");
    Ok(Spent {
        effect: HintReveal { position, letter },
        coins: remaining,
    })
}

/// Win the level by filling the current row with the target
///
/// The resulting outcome is flagged as skipped so no reward is paid.
///
/// # Errors
/// `InsufficientFunds` if `coins < cost`.
pub fn apply_skip(
    session: &mut Session,
    coins: u32,
    cost: u32,
) -> Result<Spent<SessionOutcome>, GameError> {
    let remaining = GameError::ensure_funds(coins, cost)?;

    let target = session.target.clone();
    session.keyboard.record(&target, &Feedback::PERFECT);
    session.push_attempt(target, Feedback::PERFECT);
    session.status = SessionStatus::Won;
    session.skipped = true;
    session.buffer = Default::default();

    debug!(level = session.level, coins = remaining, "level skipped");
    Ok(Spent {
        effect: session.outcome(),
        coins: remaining,
    })
}
