//! Five-letter word representation
//!
//! A `Word` is the unit of play: every target word and every recorded attempt is one.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Number of letters in every target and every attempt
pub const WORD_LENGTH: usize = 5;

/// A five-letter, uppercase ASCII word
///
/// Immutable once constructed; normalisation to uppercase happens in [`Word::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: [u8; WORD_LENGTH],
}

/// Error type for malformed words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word must contain only ASCII letters")]
    NonAscii,
    #[error("word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_levels::core::Word;
    ///
    /// let word = Word::new("crane").unwrap();
    /// assert_eq!(word.text(), "CRANE");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_uppercase();

        let length = text.chars().count();
        if length != WORD_LENGTH {
            return Err(WordError::InvalidLength(length));
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacters);
        }

        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(text.as_bytes());

        Ok(Self { text, letters })
    }

    /// Build a word from five letters, e.g. the contents of a full guess buffer
    ///
    /// # Errors
    /// Same as [`Word::new`].
    pub fn from_letters(letters: &[char]) -> Result<Self, WordError> {
        Self::new(letters.iter().collect::<String>())
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the letter at a specific position (0-4)
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: usize) -> char {
        char::from(self.letters[position])
    }

    /// Iterate over the letters in order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| char::from(b))
    }

    /// Check if the word contains a specific letter (case-insensitive)
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.letters().any(|l| l == letter)
    }

    /// Occurrence count of each letter in the word
    ///
    /// Used by the evaluator to bound duplicate-letter marks.
    #[must_use]
    pub(crate) fn letter_counts(&self) -> FxHashMap<char, u8> {
        let mut counts = FxHashMap::default();
        for letter in self.letters() {
            *counts.entry(letter).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
