//! Display functions for the play screen and command results

use super::formatters::{create_progress_bar, format_duration, format_guess_row, format_keyboard};
use crate::commands::SimulationResult;
use crate::config::{GameConfig, MAX_ATTEMPTS};
use crate::game::{BoosterKind, Session, SessionOutcome, SessionStatus};
use crate::progression::Profile;
use colored::Colorize;
use std::path::Path;

/// Print booster prices and the command list
pub fn print_booster_menu(config: &GameConfig) {
    println!("Type a five-letter word to guess. Commands:");
    for kind in BoosterKind::ALL {
        let cost = match kind {
            BoosterKind::Dart => config.costs.dart,
            BoosterKind::Hint => config.costs.hint,
            BoosterKind::Skip => config.costs.skip,
        };
        println!(
            "  {:<6} {:>3} coins  {}",
            kind.to_string().to_lowercase().bright_cyan(),
            cost,
            kind.description()
        );
    }
    println!(
        "  {:<6} {:>3} coins  replay a lost level with the same word",
        "retry".bright_cyan(),
        config.costs.retry
    );
    println!("  {:<6}            this list", "help".bright_cyan());
    println!("  {:<6}            save and exit\n", "quit".bright_cyan());
}

/// Effective booster prices and where they come from
pub fn print_config(config: &GameConfig, path: &Path, written: bool) {
    let verb = if written { "Written to" } else { "Read from" };
    println!("{verb} {}", path.display().to_string().bright_black());
    println!("  {:<6} {:>3} coins", "dart".bright_cyan(), config.costs.dart);
    println!("  {:<6} {:>3} coins", "hint".bright_cyan(), config.costs.hint);
    println!("  {:<6} {:>3} coins", "skip".bright_cyan(), config.costs.skip);
    println!("  {:<6} {:>3} coins", "retry".bright_cyan(), config.costs.retry);
    println!("  Letters per dart: {}", config.dart_letters);
}

/// Board, keyboard and balance for the current session
pub fn print_play_screen(session: &Session, profile: &Profile) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "Level {}   💰 {} coins   {} tries left",
        session.level().to_string().bright_yellow().bold(),
        profile.coins.to_string().bright_yellow(),
        session.remaining_attempts()
    );
    println!("{}", "─".repeat(40).cyan());

    for (guess, feedback) in session.attempts().iter().zip(session.feedback()) {
        println!("  {}", format_guess_row(guess, feedback));
    }
    let playing = session.status() == SessionStatus::Playing;
    if playing {
        let row: String = session
            .buffer()
            .slots()
            .iter()
            .map(|slot| format!(" {} ", slot.unwrap_or('_')))
            .collect();
        println!("  {}", row.bright_white());
    }
    for _ in session.attempts().len() + usize::from(playing)..MAX_ATTEMPTS {
        println!("  {}", " · ".repeat(5).bright_black());
    }

    println!();
    for line in format_keyboard(session.keyboard(), session.disabled_letters()) {
        println!("  {line}");
    }
    println!();
}

/// Banner for a finished level
pub fn print_level_result(outcome: &SessionOutcome, profile: &Profile) {
    let result = &outcome.result;
    println!("\n{}", "═".repeat(40).bright_cyan());
    if outcome.skipped {
        println!("  {}", format!("⏭  Level {} skipped", outcome.level).bright_yellow().bold());
    } else if result.won {
        println!("  {}", format!("🎉 Level {} cleared!", outcome.level).bright_green().bold());
        println!(
            "  Solved in {} {}, score {}",
            (result.attempts + 1).to_string().bright_cyan().bold(),
            if result.attempts == 0 { "guess" } else { "guesses" },
            result.score.to_string().bright_yellow()
        );
        println!("  Time: {}", format_duration(result.completion_time));
    } else {
        println!("  {}", format!("❌ Level {} lost", outcome.level).red().bold());
    }
    println!("  💰 {} coins", profile.coins.to_string().bright_yellow());
    println!("{}", "═".repeat(40).bright_cyan());
}

/// Summary of a saved profile
pub fn print_profile_stats(profile: &Profile) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "PLAYER STATS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Progress:".bright_cyan().bold());
    println!("   Current level:    {}", profile.current_level.to_string().bright_yellow().bold());
    println!("   Coins:            {}", profile.coins);
    println!("   Best level:       {}", profile.max_level);
    println!("   Best score:       {}", profile.max_score);
    println!(
        "   Fastest win:      {}",
        profile.max_time.map_or_else(|| "-".to_string(), format_duration)
    );

    println!("\n📈 {}", "Recent games:".bright_cyan().bold());
    println!("   Games played:     {}", profile.games_played());
    let rate = profile.win_rate();
    println!(
        "   Win rate:         [{}] {}%",
        create_progress_bar(f64::from(rate), 100.0, 20).green(),
        rate
    );
    println!(
        "   Average guesses:  {}",
        profile
            .average_attempts()
            .map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"))
    );

    if !profile.history.is_empty() {
        println!("\n🕑 {}", "History (most recent first):".bright_cyan().bold());
        for game in profile.history.iter().take(10) {
            let verdict = if game.skipped {
                "skipped".yellow()
            } else if game.won {
                "won".green()
            } else {
                "lost".red()
            };
            println!(
                "   Level {:>4}  {:<8} score {:>3}  {}",
                game.level,
                verdict,
                game.score,
                format_duration(game.completion_time)
            );
        }
    }
    println!();
}

/// Print the result of an economy simulation
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let players = result.players.len();
    println!("\n📊 {}", "Progress:".bright_cyan().bold());
    println!("   Profiles:         {players}");
    println!(
        "   Cleared {} levels: {} ({:.1}%)",
        result.levels,
        result.completed(),
        if players == 0 {
            0.0
        } else {
            result.completed() as f64 / players as f64 * 100.0
        }
    );
    println!("   Average level:    {:.2}", result.average_level());
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate()).bright_yellow().bold()
    );

    println!("\n💰 {}", "Economy:".bright_cyan().bold());
    println!("   Average coins:    {:.1}", result.average_coins());
    println!("   Darts bought:     {}", result.total(|p| p.darts));
    println!("   Hints bought:     {}", result.total(|p| p.hints));
    println!("   Skips bought:     {}", result.total(|p| p.skips));
    println!("   Retries bought:   {}", result.total(|p| p.retries));

    println!("\n   Time taken:       {:.2}s", result.duration.as_secs_f64());
}
