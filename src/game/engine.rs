//! The game facade: one session controller plus the progression store
//!
//! Every paid action runs inside a store transaction so the booster effect
//! and its price land together or not at all. Finished levels are recorded
//! as soon as the transition happens.

use super::boosters::{BoosterKind, HintReveal};
use super::controller::{GuessReport, SessionController};
use super::session::{Session, SessionOutcome};
use super::GameError;
use crate::config::GameConfig;
use crate::core::Feedback;
use crate::progression::{Profile, ProfileStorage, ProgressionStore};
use crate::wordlists::WordService;
use rand::RngCore;

/// Price and affordability of a booster right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoosterQuote {
    pub kind: BoosterKind,
    pub cost: u32,
    pub affordable: bool,
}

/// A player's game: the level in play plus the profile it pays into
///
/// Generic over the dictionary, the random source and the storage backend so
/// tests and simulations can run with seeded RNGs and in-memory profiles.
pub struct Game<'a, W: WordService + ?Sized, R: RngCore, S: ProfileStorage> {
    controller: SessionController<'a, W, R>,
    store: ProgressionStore<S>,
}

impl<'a, W: WordService + ?Sized, R: RngCore, S: ProfileStorage> Game<'a, W, R, S> {
    pub fn new(words: &'a W, rng: R, config: GameConfig, store: ProgressionStore<S>) -> Self {
        Self {
            controller: SessionController::new(words, rng, config),
            store,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        self.store.profile()
    }

    #[must_use]
    pub fn store(&self) -> &ProgressionStore<S> {
        &self.store
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.controller.session()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.controller.config()
    }

    /// Start the profile's current level with a new target
    pub fn start_level(&mut self) -> &Session {
        let level = self.store.profile().current_level;
        self.controller.start(level)
    }

    /// # Errors
    /// `SessionNotPlaying` outside of active play.
    pub fn type_letter(&mut self, letter: char) -> Result<bool, GameError> {
        self.controller.type_letter(letter)
    }

    /// # Errors
    /// `SessionNotPlaying` outside of active play.
    pub fn backspace(&mut self) -> Result<Option<char>, GameError> {
        self.controller.backspace()
    }

    /// # Errors
    /// See [`SessionController::submit_guess`].
    pub fn submit_input(&mut self) -> Result<Feedback, GameError> {
        self.controller.submit_input()
    }

    /// # Errors
    /// See [`SessionController::submit_guess`].
    pub fn submit_guess(&mut self, letters: &str) -> Result<Feedback, GameError> {
        self.controller.submit_guess(letters)
    }

    /// Finish the pending reveal, recording the level if it ended
    ///
    /// # Errors
    /// `GameError::Persistence` if the finished level could not be saved.
    /// It is still recorded in memory.
    pub fn complete_reveal(&mut self) -> Result<Option<SessionOutcome>, GameError> {
        let Some(outcome) = self.controller.complete_reveal() else {
            return Ok(None);
        };
        self.store.finalize_and_persist(&outcome)?;
        Ok(Some(outcome))
    }

    /// Submit a guess and resolve it without waiting on a reveal
    ///
    /// A failed save of the finished level does not lose the report: it comes
    /// back with `saved == false` and the store stays dirty until the next
    /// successful write.
    ///
    /// # Errors
    /// Guess validation errors; nothing changes on error.
    pub fn guess(&mut self, letters: &str) -> Result<GuessReport, GameError> {
        let feedback = self.submit_guess(letters)?;
        let outcome = self.controller.complete_reveal();
        let saved = match &outcome {
            Some(outcome) => self.store.finalize_and_persist(outcome).is_ok(),
            None => true,
        };
        let status = self
            .session()
            .map_or(super::SessionStatus::Playing, Session::status);
        Ok(GuessReport {
            feedback,
            status,
            outcome,
            saved,
        })
    }

    #[must_use]
    pub fn quote_booster(&self, kind: BoosterKind) -> BoosterQuote {
        let costs = &self.config().costs;
        let cost = match kind {
            BoosterKind::Dart => costs.dart,
            BoosterKind::Hint => costs.hint,
            BoosterKind::Skip => costs.skip,
        };
        BoosterQuote {
            kind,
            cost,
            affordable: self.profile().coins >= cost,
        }
    }

    #[must_use]
    pub fn retry_cost(&self) -> u32 {
        self.config().costs.retry
    }

    /// Disable letters absent from the target, returning them
    ///
    /// # Errors
    /// `SessionNotPlaying`, `InsufficientFunds` or a persistence failure.
    pub fn use_dart(&mut self) -> Result<Vec<char>, GameError> {
        let controller = &mut self.controller;
        self.store.transact(|profile| {
            let spent = controller.use_dart(profile.coins)?;
            profile.coins = spent.coins;
            Ok(spent.effect)
        })
    }

    /// Reveal and lock one position
    ///
    /// # Errors
    /// `SessionNotPlaying`, `InsufficientFunds`, `NoAvailablePosition` or a
    /// persistence failure.
    pub fn use_hint(&mut self) -> Result<HintReveal, GameError> {
        let controller = &mut self.controller;
        self.store.transact(|profile| {
            let spent = controller.use_hint(profile.coins)?;
            profile.coins = spent.coins;
            Ok(spent.effect)
        })
    }

    /// Pay to win the level outright; the skip is recorded in the same write
    ///
    /// # Errors
    /// `SessionNotPlaying`, `InsufficientFunds` or a persistence failure.
    pub fn use_skip(&mut self) -> Result<SessionOutcome, GameError> {
        let controller = &mut self.controller;
        self.store.transact(|profile| {
            let spent = controller.use_skip(profile.coins)?;
            profile.coins = spent.coins;
            profile.record(&spent.effect);
            Ok(spent.effect)
        })
    }

    /// Pay to replay a lost level, returning the new balance
    ///
    /// # Errors
    /// `SessionNotTerminal`, `LevelAlreadyWon`, `InsufficientFunds` or a
    /// persistence failure.
    pub fn retry(&mut self) -> Result<u32, GameError> {
        self.controller.check_retry()?;
        let paid = self.store.spend(self.retry_cost());
        // A failed save still took the coins in memory
        if !matches!(paid, Err(GameError::InsufficientFunds { .. })) {
            self.controller.restart_lost();
        }
        paid
    }

    /// Retry a failed profile write
    ///
    /// # Errors
    /// `GameError::Persistence` if the backend still fails.
    pub fn flush(&mut self) -> Result<(), GameError> {
        Ok(self.store.flush()?)
    }
}
