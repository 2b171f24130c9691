//! Per-letter feedback for a guess
//!
//! Feedback is five [`LetterStatus`] values, index-aligned with the guess.
//! The evaluator handles repeated letters so that, for any letter, the number
//! of `Correct` + `Present` marks never exceeds its count in the target.

use super::{WORD_LENGTH, Word};
use std::fmt;
use std::str::FromStr;

/// Correctness classification of one letter
///
/// Variants are ordered by strength, so `max` gives the keyboard precedence
/// `Correct > Present > Absent > Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LetterStatus {
    /// Never guessed
    #[default]
    Unknown,
    /// Not in the target (or all occurrences already accounted for)
    Absent,
    /// In the target, wrong position
    Present,
    /// Right letter, right position
    Correct,
}

impl LetterStatus {
    /// Emoji tile for this status
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
            Self::Unknown => '⬜',
        }
    }
}

/// Feedback for a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([LetterStatus; WORD_LENGTH]);

impl Feedback {
    /// All correct (the guess is the target)
    pub const PERFECT: Self = Self([LetterStatus::Correct; WORD_LENGTH]);

    /// Wrap raw statuses
    #[must_use]
    pub const fn new(statuses: [LetterStatus; WORD_LENGTH]) -> Self {
        Self(statuses)
    }

    /// Score `guess` against `target`
    ///
    /// # Algorithm
    /// 1. Count remaining occurrences of each letter in the target
    /// 2. First pass: exact positional matches are `Correct` and consume a count
    /// 3. Second pass: other positions are `Present` while the letter still has
    ///    a remaining count (consuming it), otherwise `Absent`
    ///
    /// # Examples
    /// ```
    /// use wordle_levels::core::{Feedback, Word};
    ///
    /// let guess = Word::new("erase").unwrap();
    /// let target = Word::new("speed").unwrap();
    /// let feedback = Feedback::calculate(&guess, &target);
    ///
    /// // Only two E's exist in SPEED, so at most two E's are marked
    /// assert_eq!(feedback.to_string(), "Y--YY");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let mut result = [LetterStatus::Absent; WORD_LENGTH];
        let mut remaining = target.letter_counts();

        // Allow: index needed to compare guess[i] with target[i] and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            let letter = guess.letter_at(i);
            if letter == target.letter_at(i) {
                result[i] = LetterStatus::Correct;
                if let Some(count) = remaining.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == LetterStatus::Correct {
                continue;
            }
            let letter = guess.letter_at(i);
            if let Some(count) = remaining.get_mut(&letter)
                && *count > 0
            {
                result[i] = LetterStatus::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Statuses in guess order
    #[inline]
    #[must_use]
    pub const fn statuses(&self) -> &[LetterStatus; WORD_LENGTH] {
        &self.0
    }

    /// Check if every letter is correct
    #[inline]
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        *self == Self::PERFECT
    }

    /// Number of `Correct` positions
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.count(LetterStatus::Correct)
    }

    /// Number of `Present` positions
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.count(LetterStatus::Present)
    }

    fn count(&self, status: LetterStatus) -> usize {
        self.0.iter().filter(|&&s| s == status).count()
    }

    /// Emoji row like "🟩🟨⬛⬛🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.emoji()).collect()
    }
}

/// Score one guess against the target word
///
/// Free-function form of [`Feedback::calculate`].
#[must_use]
pub fn evaluate(guess: &Word, target: &Word) -> Feedback {
    Feedback::calculate(guess, target)
}

impl fmt::Display for Feedback {
    /// Compact form: `G` correct, `Y` present, `-` absent, `?` unknown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for status in &self.0 {
            let c = match status {
                LetterStatus::Correct => 'G',
                LetterStatus::Present => 'Y',
                LetterStatus::Absent => '-',
                LetterStatus::Unknown => '?',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Feedback {
    type Err = String;

    /// Parse "GY-GY" or "🟩🟨⬛🟩🟨"; `_` and ⬜ are accepted as absent
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(format!("Invalid feedback string: {s}"));
        }

        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
        for (slot, ch) in statuses.iter_mut().zip(chars) {
            *slot = match ch {
                'G' | 'g' | '🟩' => LetterStatus::Correct,
                'Y' | 'y' | '🟨' => LetterStatus::Present,
                '-' | '_' | '⬛' | '⬜' => LetterStatus::Absent,
                _ => return Err(format!("Invalid feedback string: {s}")),
            };
        }
        Ok(Self(statuses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(guess: &str, target: &str) -> Feedback {
        evaluate(&Word::new(guess).unwrap(), &Word::new(target).unwrap())
    }

    fn marked(feedback: &Feedback, guess: &str, letter: char) -> usize {
        guess
            .to_uppercase()
            .chars()
            .zip(feedback.statuses())
            .filter(|(l, s)| *l == letter && matches!(s, LetterStatus::Correct | LetterStatus::Present))
            .count()
    }

    #[test]
    fn all_absent() {
        let result = feedback("abcde", "fghij");
        assert_eq!(result.to_string(), "-----");
        assert_eq!(result.count_correct(), 0);
        assert_eq!(result.count_present(), 0);
    }

    #[test]
    fn all_correct() {
        let result = feedback("crane", "crane");
        assert_eq!(result, Feedback::PERFECT);
        assert!(result.is_perfect());
    }

    #[test]
    fn erase_against_speed_marks_only_two_es() {
        let result = feedback("erase", "speed");
        assert_eq!(result.to_string(), "Y--YY");
        assert_eq!(marked(&result, "erase", 'E'), 2);
    }

    #[test]
    fn speed_against_erase() {
        let result = feedback("speed", "erase");
        assert_eq!(result.to_string(), "Y-YY-");
    }

    #[test]
    fn exact_match_takes_priority_over_present() {
        // ROBOT vs FLOOR: the second O is exact, the first O still present
        let result = feedback("robot", "floor");
        assert_eq!(result.to_string(), "YY-G-");

        // EEEEE vs SPEED: the two exact E's consume both occurrences
        let result = feedback("eeeee", "speed");
        assert_eq!(result.to_string(), "--GG-");
    }

    #[test]
    fn excess_duplicates_marked_absent() {
        // LLAMA vs LEMON: only one L exists
        let result = feedback("llama", "lemon");
        assert_eq!(result.to_string(), "G--Y-");
        assert_eq!(marked(&result, "llama", 'L'), 1);
    }

    #[test]
    fn duplicate_bound_holds_across_word_list() {
        let words = ["speed", "erase", "geese", "llama", "robot", "floor", "eerie", "sheep"];
        for guess in words {
            for target in words {
                let result = feedback(guess, target);
                let target_word = Word::new(target).unwrap();
                for letter in Word::new(guess).unwrap().letters() {
                    let available = target_word.letters().filter(|&l| l == letter).count();
                    assert!(
                        marked(&result, guess, letter) <= available,
                        "{guess} vs {target}: too many marks for {letter}"
                    );
                }
            }
        }
    }

    #[test]
    fn parse_feedback_strings() {
        let p1: Feedback = "GY-GY".parse().unwrap();
        let p2: Feedback = "🟩🟨⬛🟩🟨".parse().unwrap();
        let p3: Feedback = "gy_gy".parse().unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1, p3);

        assert!("GYG".parse::<Feedback>().is_err());
        assert!("GXGGY".parse::<Feedback>().is_err());
    }

    #[test]
    fn emoji_row() {
        let result = feedback("crane", "slate");
        assert_eq!(result.to_emoji(), "⬛⬛🟩⬛🟩");
    }

    #[test]
    fn status_ordering_matches_keyboard_precedence() {
        assert!(LetterStatus::Correct > LetterStatus::Present);
        assert!(LetterStatus::Present > LetterStatus::Absent);
        assert!(LetterStatus::Absent > LetterStatus::Unknown);
    }
}
