//! Dictionary service consumed by the session controller
//!
//! The game only needs two things from a dictionary: a random target word and
//! a validity check for guesses. [`WordService`] is that seam; [`WordList`] is
//! the in-process implementation backed by the embedded or file word lists.

use super::loader::{load_from_file, words_from_slice};
use super::{ALLOWED, ANSWERS};
use crate::core::Word;
use rand::RngCore;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;

/// Source of target words and guess validation
pub trait WordService {
    /// Draw a target word using the injected random source
    fn random_word(&self, rng: &mut dyn RngCore) -> Word;

    /// Whether `candidate` is an acceptable guess (case-insensitive)
    fn is_valid_word(&self, candidate: &str) -> bool;
}

/// Answer pool plus the set of accepted guesses
///
/// Every answer is also an accepted guess.
#[derive(Debug, Clone)]
pub struct WordList {
    answers: Vec<Word>,
    allowed: FxHashSet<String>,
}

impl WordList {
    /// Build from explicit word sets
    ///
    /// Returns `None` if `answers` is empty, since no target could ever be drawn.
    #[must_use]
    pub fn new(answers: Vec<Word>, allowed: impl IntoIterator<Item = Word>) -> Option<Self> {
        if answers.is_empty() {
            return None;
        }

        let mut allowed: FxHashSet<String> =
            allowed.into_iter().map(|w| w.text().to_string()).collect();
        allowed.extend(answers.iter().map(|w| w.text().to_string()));

        Some(Self { answers, allowed })
    }

    /// The lists compiled into the binary
    ///
    /// Returns `None` if the embedded answer list is empty.
    #[must_use]
    pub fn embedded() -> Option<Self> {
        Self::new(words_from_slice(ANSWERS), words_from_slice(ALLOWED))
    }

    /// Build from plain word slices (mostly for tests and tooling)
    #[must_use]
    pub fn from_slices(answers: &[&str], allowed: &[&str]) -> Option<Self> {
        Self::new(words_from_slice(answers), words_from_slice(allowed))
    }

    /// Load a custom list where every line is both a possible answer and a valid guess
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or `InvalidData` if
    /// it contains no usable words.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let words = load_from_file(path)?;
        Self::new(words.clone(), words).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "word list contains no valid words")
        })
    }

    /// Possible target words
    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// Number of accepted guesses
    #[must_use]
    pub fn allowed_count(&self) -> usize {
        self.allowed.len()
    }
}

impl WordService for WordList {
    fn random_word(&self, rng: &mut dyn RngCore) -> Word {
        // Non-empty by construction
        self.answers
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| self.answers[0].clone())
    }

    fn is_valid_word(&self, candidate: &str) -> bool {
        self.allowed.contains(&candidate.to_uppercase())
    }
}
