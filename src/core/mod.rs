//! Core domain types for the level game
//!
//! Words, per-letter feedback and the guess evaluator. Everything here is pure
//! and has no knowledge of sessions, coins or persistence.

mod feedback;
mod word;

pub use feedback::{Feedback, LetterStatus, evaluate};
pub use word::{WORD_LENGTH, Word, WordError};
