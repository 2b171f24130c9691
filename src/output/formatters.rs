//! Formatting utilities for terminal output

use crate::core::{Feedback, LetterStatus, Word};
use crate::game::Keyboard;
use colored::{ColoredString, Colorize};
use std::collections::BTreeSet;
use std::time::Duration;

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Guess letters as colored tiles, one per position
#[must_use]
pub fn format_guess_row(guess: &Word, feedback: &Feedback) -> String {
    guess
        .letters()
        .zip(feedback.statuses())
        .map(|(letter, &status)| tile(letter, status).to_string())
        .collect::<Vec<_>>()
        .join("")
}

fn tile(letter: char, status: LetterStatus) -> ColoredString {
    let text = format!(" {letter} ");
    match status {
        LetterStatus::Correct => text.black().on_green().bold(),
        LetterStatus::Present => text.black().on_yellow().bold(),
        LetterStatus::Absent => text.white().on_bright_black(),
        LetterStatus::Unknown => text.normal(),
    }
}

/// Label for one keyboard key; darted letters are blanked out
#[must_use]
pub fn key_label(letter: char, disabled: bool) -> char {
    if disabled { '·' } else { letter }
}

/// All three keyboard rows, colored by the best status seen per letter
#[must_use]
pub fn format_keyboard(keyboard: &Keyboard, disabled: &BTreeSet<char>) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|letter| {
                    let label = key_label(letter, disabled.contains(&letter)).to_string();
                    match keyboard.status(letter) {
                        LetterStatus::Correct => label.green().bold(),
                        LetterStatus::Present => label.yellow().bold(),
                        LetterStatus::Absent => label.bright_black(),
                        LetterStatus::Unknown => label.normal(),
                    }
                    .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Human-readable duration: `42.1s`, `3m 07s`, `1h 02m`
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_under_a_minute() {
        assert_eq!(format_duration(Duration::from_millis(42_140)), "42.1s");
        assert_eq!(format_duration(Duration::ZERO), "0.0s");
    }

    #[test]
    fn duration_minutes_and_hours() {
        assert_eq!(format_duration(Duration::from_secs(187)), "3m 07s");
        assert_eq!(format_duration(Duration::from_secs(3720)), "1h 02m");
    }

    #[test]
    fn disabled_keys_are_blanked() {
        assert_eq!(key_label('Q', true), '·');
        assert_eq!(key_label('Q', false), 'Q');
    }

    #[test]
    fn keyboard_covers_alphabet() {
        let letters: BTreeSet<char> = KEYBOARD_ROWS.iter().flat_map(|r| r.chars()).collect();
        assert_eq!(letters.len(), 26);
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }
}
