//! Interactive text mode
//!
//! Reads one command per line: a five-letter guess, a booster name, `retry`,
//! `next` or `quit`. Paid actions ask for a yes/no confirmation first.

use crate::game::{BoosterKind, Game, GameError, Session, SessionStatus};
use crate::output::{print_booster_menu, print_level_result, print_play_screen};
use crate::progression::ProfileStorage;
use crate::wordlists::WordService;
use colored::Colorize;
use rand::RngCore;
use std::io::{self, BufRead, Write};
use tracing::warn;

const UNSAVED: &str = "⚠ Progress is not saved yet; it will be written on the next change.";

/// What the player asked for on one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Guess(String),
    Booster(BoosterKind),
    Retry,
    Next,
    Help,
    Quit,
}

impl PlayCommand {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "dart" | "d" => Self::Booster(BoosterKind::Dart),
            "hint" | "h" => Self::Booster(BoosterKind::Hint),
            "skip" | "s" => Self::Booster(BoosterKind::Skip),
            "retry" | "r" => Self::Retry,
            "next" | "n" => Self::Next,
            "help" | "?" => Self::Help,
            _ => Self::Guess(input),
        }
    }
}

/// Run the interactive game loop on `input` until `quit` or end of input
///
/// # Errors
///
/// Returns an error if reading input or flushing stdout fails.
pub fn run_play<W, R, S>(game: &mut Game<'_, W, R, S>, input: &mut impl BufRead) -> io::Result<()>
where
    W: WordService + ?Sized,
    R: RngCore,
    S: ProfileStorage,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Wordle Levels - Play                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_booster_menu(game.config());

    game.start_level();

    loop {
        if let Some(session) = game.session() {
            print_play_screen(session, game.profile());
        }
        let status = game
            .session()
            .map_or(SessionStatus::Playing, Session::status);
        let prompt = match status {
            SessionStatus::Playing => "Guess (or dart/hint/skip/quit)",
            SessionStatus::Won => "'next' for the next level, 'quit' to exit",
            SessionStatus::Lost => "'retry' to replay this word, 'next' for a new word, 'quit'",
        };

        let Some(line) = read_line(prompt, input)? else {
            break;
        };

        match (PlayCommand::parse(&line), status) {
            (PlayCommand::Quit, _) => break,
            (PlayCommand::Help, _) => print_booster_menu(game.config()),
            (PlayCommand::Next, SessionStatus::Playing) => {
                println!("{}", "Finish or skip this level first.".yellow());
            }
            (PlayCommand::Next, _) => {
                game.start_level();
            }
            (PlayCommand::Retry, _) => {
                let cost = game.retry_cost();
                if status == SessionStatus::Lost
                    && !confirm(&format!("Retry for {cost} coins?"), input)?
                {
                    continue;
                }
                report(game.retry().map(|coins| {
                    println!("{}", format!("Same word, fresh board. {coins} coins left.").cyan());
                }));
            }
            (PlayCommand::Booster(kind), _) => {
                use_booster(game, kind, input)?;
            }
            (PlayCommand::Guess(_), SessionStatus::Won | SessionStatus::Lost) => {
                println!("{}", "This level is over.".yellow());
            }
            (PlayCommand::Guess(word), SessionStatus::Playing) => {
                report(game.guess(&word).map(|guessed| {
                    if let Some(outcome) = guessed.outcome {
                        print_level_result(&outcome, game.profile());
                    }
                    if !guessed.saved {
                        println!("{}", UNSAVED.red());
                    }
                }));
            }
        }
    }

    if let Err(e) = game.flush() {
        warn!(error = %e, "progress not saved on exit");
        println!("{}", format!("⚠ {e}").red());
    }
    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

fn use_booster<W, R, S>(
    game: &mut Game<'_, W, R, S>,
    kind: BoosterKind,
    input: &mut impl BufRead,
) -> io::Result<()>
where
    W: WordService + ?Sized,
    R: RngCore,
    S: ProfileStorage,
{
    let quote = game.quote_booster(kind);
    if !quote.affordable {
        println!(
            "{}",
            format!(
                "{kind} costs {} coins, you have {}.",
                quote.cost,
                game.profile().coins
            )
            .red()
        );
        return Ok(());
    }
    if !confirm(&format!("Use {kind} for {} coins?", quote.cost), input)? {
        return Ok(());
    }

    match kind {
        BoosterKind::Dart => report(game.use_dart().map(|letters| {
            let letters: String = letters.into_iter().collect();
            if letters.is_empty() {
                println!("{}", "🎯 No letters left to remove.".cyan());
            } else {
                println!("{}", format!("🎯 Removed: {letters}").cyan());
            }
        })),
        BoosterKind::Hint => report(game.use_hint().map(|reveal| {
            println!(
                "{}",
                format!("💡 Position {} is {}", reveal.position + 1, reveal.letter).cyan()
            );
        })),
        BoosterKind::Skip => report(game.use_skip().map(|outcome| {
            print_level_result(&outcome, game.profile());
        })),
    }
    Ok(())
}

fn report(result: Result<(), GameError>) {
    match result {
        Ok(()) => {}
        Err(e @ GameError::Persistence(_)) => {
            println!("{}", format!("⚠ {e}").red());
            println!("{}", UNSAVED.red());
        }
        Err(e) => println!("{}", format!("✗ {e}").yellow()),
    }
}

/// Ask a yes/no question; anything but yes is a no
fn confirm(question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    let answer = read_line(&format!("{question} (yes/no)"), input)?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("yes" | "y")
    ))
}

/// Prompt and read one trimmed line; `None` at end of input
fn read_line(prompt: &str, input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
