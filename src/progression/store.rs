//! Progression store: the single writer of a profile
//!
//! All profile mutation goes through [`ProgressionStore`]. Each mutation is
//! applied to a draft, committed in memory on success, then written through
//! the storage backend. A failed write keeps the in-memory profile and marks
//! the store dirty; the next mutation (or [`ProgressionStore::flush`]) writes
//! the latest state again.

use super::{PersistenceError, Profile, ProfileStorage};
use crate::game::{GameError, SessionOutcome};
use tracing::{debug, info, warn};

/// Owner of the in-memory profile and the backend it is written to
pub struct ProgressionStore<S: ProfileStorage> {
    storage: S,
    profile: Profile,
    dirty: bool,
}

impl<S: ProfileStorage> ProgressionStore<S> {
    /// Load the saved profile, or start a fresh one if none exists
    ///
    /// # Errors
    /// Propagates backend failures, including a malformed saved profile.
    pub fn open(storage: S) -> Result<Self, PersistenceError> {
        let profile = match storage.load()? {
            Some(mut profile) => {
                if profile.repair() {
                    warn!(
                        level = profile.current_level,
                        history = profile.history.len(),
                        "saved profile was out of range, repaired"
                    );
                }
                debug!(
                    level = profile.current_level,
                    coins = profile.coins,
                    "loaded profile"
                );
                profile
            }
            None => {
                info!("no saved profile, starting fresh");
                Profile::default()
            }
        };
        Ok(Self {
            storage,
            profile,
            dirty: false,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether the in-memory profile has changes the backend has not accepted
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply `f` atomically and persist
    ///
    /// If `f` fails, the profile is untouched and its error is returned.
    ///
    /// # Errors
    /// The error from `f`, or `GameError::Persistence` if the change was
    /// committed in memory but could not be written.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Profile) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut draft = self.profile.clone();
        let value = f(&mut draft)?;
        self.profile = draft;
        self.dirty = true;
        self.flush()?;
        Ok(value)
    }

    /// Deduct `cost` coins, returning the new balance
    ///
    /// # Errors
    /// `InsufficientFunds` without mutation, or a persistence failure.
    pub fn spend(&mut self, cost: u32) -> Result<u32, GameError> {
        self.transact(|profile| {
            profile.coins = GameError::ensure_funds(profile.coins, cost)?;
            Ok(profile.coins)
        })
    }

    /// Record a finished level and persist the whole profile in one write
    ///
    /// # Errors
    /// `GameError::Persistence` if the write failed; the result is still
    /// recorded in memory.
    pub fn finalize_and_persist(&mut self, outcome: &SessionOutcome) -> Result<(), GameError> {
        info!(
            level = outcome.level,
            won = outcome.result.won,
            skipped = outcome.skipped,
            score = outcome.result.score,
            time_ms = outcome.result.completion_time.as_millis(),
            "level finished"
        );
        self.transact(|profile| {
            profile.record(outcome);
            Ok(())
        })
    }

    /// Write the current profile if a previous write failed
    ///
    /// # Errors
    /// Backend failure; the store stays dirty.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.dirty {
            return Ok(());
        }
        match self.storage.save(&self.profile) {
            Ok(()) => {
                self.dirty = false;
                debug!(coins = self.profile.coins, "profile saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "profile save failed, keeping in-memory state");
                Err(e)
            }
        }
    }
}
