//! State of one level in progress
//!
//! A `Session` is created when a level starts and is only mutated through
//! [`SessionController`](super::SessionController) and the booster resolver.
//! Readers (the UI) get immutable access to everything here.

use crate::config::{MAX_ATTEMPTS, score_for_row};
use crate::core::{Feedback, LetterStatus, WORD_LENGTH, Word};
use crate::progression::GameResult;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Best known status of each letter across all attempts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard(FxHashMap<char, LetterStatus>);

impl Keyboard {
    #[must_use]
    pub fn status(&self, letter: char) -> LetterStatus {
        self.0
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or_default()
    }

    /// Merge one attempt's feedback; a letter's status only ever strengthens
    pub fn record(&mut self, guess: &Word, feedback: &Feedback) {
        for (letter, &status) in guess.letters().zip(feedback.statuses()) {
            let entry = self.0.entry(letter).or_default();
            *entry = (*entry).max(status);
        }
    }

    /// Letters with a known status, alphabetical
    #[must_use]
    pub fn known(&self) -> Vec<(char, LetterStatus)> {
        let mut known: Vec<_> = self.0.iter().map(|(&l, &s)| (l, s)).collect();
        known.sort_unstable_by_key(|&(l, _)| l);
        known
    }
}

/// The in-progress guess row
///
/// Slots at locked positions always hold the target's letter and cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessBuffer {
    slots: [Option<char>; WORD_LENGTH],
}

impl GuessBuffer {
    /// Fill the first empty slot; returns `false` if the row is full
    pub(crate) fn push(&mut self, letter: char) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(letter);
                true
            }
            None => false,
        }
    }

    /// Clear the last filled slot that is not locked
    pub(crate) fn pop(&mut self, locked: &BTreeSet<usize>) -> Option<char> {
        let index = (0..WORD_LENGTH)
            .rev()
            .find(|i| !locked.contains(i) && self.slots[*i].is_some())?;
        self.slots[index].take()
    }

    pub(crate) fn set(&mut self, index: usize, letter: char) {
        self.slots[index] = Some(letter);
    }

    /// Empty the row, keeping locked letters in place
    pub(crate) fn reset(&mut self, target: &Word, locked: &BTreeSet<usize>) {
        self.slots = [None; WORD_LENGTH];
        for &index in locked {
            self.slots[index] = Some(target.letter_at(index));
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<char>; WORD_LENGTH] {
        &self.slots
    }

    /// Letters typed so far, in row order, skipping gaps
    #[must_use]
    pub fn text(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// Everything [`ProgressionStore`](crate::progression::ProgressionStore) needs from a finished level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub level: u32,
    pub skipped: bool,
    pub result: GameResult,
}

/// One attempt at a level: the hidden target, the guesses so far and what
/// boosters have revealed or removed
///
/// Attempts and feedback are index-aligned. Locked positions and disabled
/// letters survive a retry; attempts do not.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) level: u32,
    pub(crate) target: Word,
    pub(crate) attempts: Vec<Word>,
    pub(crate) feedback: Vec<Feedback>,
    pub(crate) status: SessionStatus,
    pub(crate) locked_positions: BTreeSet<usize>,
    pub(crate) disabled_letters: BTreeSet<char>,
    pub(crate) keyboard: Keyboard,
    pub(crate) buffer: GuessBuffer,
    pub(crate) started_at: Instant,
    pub(crate) skipped: bool,
    /// Set between submitting a guess and finishing its reveal
    pub(crate) revealing: bool,
}

impl Session {
    pub(crate) fn new(level: u32, target: Word) -> Self {
        Self {
            level,
            target,
            attempts: Vec::with_capacity(MAX_ATTEMPTS),
            feedback: Vec::with_capacity(MAX_ATTEMPTS),
            status: SessionStatus::Playing,
            locked_positions: BTreeSet::new(),
            disabled_letters: BTreeSet::new(),
            keyboard: Keyboard::default(),
            buffer: GuessBuffer::default(),
            started_at: Instant::now(),
            skipped: false,
            revealing: false,
        }
    }

    /// Level number this session plays
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The word to find
    #[must_use]
    pub fn target(&self) -> &Word {
        &self.target
    }

    /// Guesses submitted so far, oldest first
    #[must_use]
    pub fn attempts(&self) -> &[Word] {
        &self.attempts
    }

    /// Feedback for each attempt, index-aligned with [`Session::attempts`]
    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Positions revealed by hints
    #[must_use]
    pub fn locked_positions(&self) -> &BTreeSet<usize> {
        &self.locked_positions
    }

    /// Letters removed by darts; none of them are in the target
    #[must_use]
    pub fn disabled_letters(&self) -> &BTreeSet<char> {
        &self.disabled_letters
    }

    #[must_use]
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// The row being typed
    #[must_use]
    pub fn buffer(&self) -> &GuessBuffer {
        &self.buffer
    }

    /// Completed with the skip booster
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// Accepting guesses and boosters right now
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.status == SessionStatus::Playing && !self.revealing
    }

    /// Guesses left before the level is lost
    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.attempts.len())
    }

    pub(crate) fn elapsed(&self) -> Duration {
        // Whole milliseconds, matching what the profile stores
        let ms = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(ms)
    }

    /// Record a completed attempt (feedback applied to the keyboard later)
    pub(crate) fn push_attempt(&mut self, guess: Word, feedback: Feedback) {
        self.attempts.push(guess);
        self.feedback.push(feedback);
    }

    /// Build the result for a session that just became terminal
    pub(crate) fn outcome(&self) -> SessionOutcome {
        let won = self.status == SessionStatus::Won;
        let row = u32::try_from(self.attempts.len().saturating_sub(1)).unwrap_or(u32::MAX);
        SessionOutcome {
            level: self.level,
            skipped: self.skipped,
            result: GameResult {
                level: self.level,
                won,
                attempts: row,
                completion_time: self.elapsed(),
                score: if won { score_for_row(row) } else { 0 },
                skipped: self.skipped,
            },
        }
    }
}
