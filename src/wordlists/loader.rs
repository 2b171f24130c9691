//! Word list loading utilities
//!
//! Provides functions to load word lists from files or use embedded constants.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Load words from a file, one per line
///
/// Returns a vector of valid Word instances, skipping blank lines and any
/// entry that is not a five-letter ASCII word.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let mut skipped = 0usize;
    let words: Vec<Word> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let word = Word::new(line).ok();
            if word.is_none() {
                skipped += 1;
            }
            word
        })
        .collect();

    debug!(
        path = %path.display(),
        loaded = words.len(),
        skipped,
        "loaded word list"
    );

    Ok(words)
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use wordle_levels::wordlists::loader::words_from_slice;
/// use wordle_levels::wordlists::ANSWERS;
///
/// let words = words_from_slice(ANSWERS);
/// assert_eq!(words.len(), ANSWERS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
