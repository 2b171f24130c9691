//! Economy simulation
//!
//! Plays many automated profiles in parallel and reports how coins and
//! levels evolve. Each profile is driven by a bot that guesses among the
//! answers still consistent with everything revealed so far.

use crate::config::GameConfig;
use crate::core::{WORD_LENGTH, Word, evaluate};
use crate::game::{Game, Session, SessionStatus};
use crate::progression::{MemoryProfileStorage, ProgressionStore};
use crate::wordlists::WordService;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sessions a bot may play per level before giving up
const SESSIONS_PER_LEVEL: usize = 5;

/// Candidates above which the bot buys a dart on its second guess
const DART_THRESHOLD: usize = 20;

/// How many profiles to play, how far, and from which seed
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub players: usize,
    pub levels: u32,
    pub seed: u64,
    pub show_progress: bool,
}

/// Final state of one simulated profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSummary {
    pub level_reached: u32,
    pub coins: u32,
    pub wins: usize,
    pub losses: usize,
    pub skips: usize,
    pub retries: usize,
    pub darts: usize,
    pub hints: usize,
}

#[derive(Debug)]
pub struct SimulationResult {
    pub players: Vec<PlayerSummary>,
    pub levels: u32,
    pub duration: Duration,
}

impl SimulationResult {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.level_reached > self.levels)
            .count()
    }

    #[must_use]
    pub fn average_coins(&self) -> f64 {
        self.average(|p| f64::from(p.coins))
    }

    #[must_use]
    pub fn average_level(&self) -> f64 {
        self.average(|p| f64::from(p.level_reached))
    }

    /// Percentage of all finished sessions that were won without skipping
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let wins: usize = self.players.iter().map(|p| p.wins).sum();
        let losses: usize = self.players.iter().map(|p| p.losses).sum();
        if wins + losses == 0 {
            return 0.0;
        }
        wins as f64 / (wins + losses) as f64 * 100.0
    }

    #[must_use]
    pub fn total(&self, field: impl Fn(&PlayerSummary) -> usize) -> usize {
        self.players.iter().map(field).sum()
    }

    fn average(&self, field: impl Fn(&PlayerSummary) -> f64) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        self.players.iter().map(field).sum::<f64>() / self.players.len() as f64
    }
}

/// Play `config.players` fresh profiles through `config.levels` levels
pub fn run_simulation<W: WordService + Sync + ?Sized>(
    words: &W,
    pool: &[Word],
    game_config: GameConfig,
    config: &SimulationConfig,
) -> SimulationResult {
    let start = Instant::now();

    let pb = if config.show_progress {
        ProgressBar::new(config.players as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░")),
    );

    let players: Vec<PlayerSummary> = (0..config.players)
        .into_par_iter()
        .map(|index| {
            let seed = config.seed.wrapping_add(index as u64);
            let summary = play_profile(words, pool, game_config, config.levels, seed);
            pb.inc(1);
            summary
        })
        .collect();

    pb.finish_with_message("Complete!");

    SimulationResult {
        players,
        levels: config.levels,
        duration: start.elapsed(),
    }
}

/// Drive one profile until it clears `levels` or runs out of sessions
pub fn play_profile<W: WordService + ?Sized>(
    words: &W,
    pool: &[Word],
    game_config: GameConfig,
    levels: u32,
    seed: u64,
) -> PlayerSummary {
    let mut summary = PlayerSummary::default();
    let Ok(store) = ProgressionStore::open(MemoryProfileStorage::new()) else {
        return summary;
    };
    let mut game = Game::new(words, StdRng::seed_from_u64(seed), game_config, store);
    let mut bot_rng = StdRng::seed_from_u64(seed.rotate_left(32));

    let mut sessions = 0;
    let mut level_losses = 0;
    let budget = levels as usize * SESSIONS_PER_LEVEL;
    game.start_level();

    while game.profile().current_level <= levels && sessions < budget {
        play_session(&mut game, pool, &mut bot_rng, &mut summary);
        sessions += 1;

        match game.session().map(Session::status) {
            Some(SessionStatus::Won) => {
                level_losses = 0;
                game.start_level();
            }
            Some(SessionStatus::Lost) => {
                level_losses += 1;
                if game.retry().is_ok() {
                    summary.retries += 1;
                    if level_losses >= 2 && try_skip(&mut game, &mut summary) {
                        level_losses = 0;
                        game.start_level();
                    }
                } else {
                    game.start_level();
                }
            }
            _ => break,
        }
    }

    summary.level_reached = game.profile().current_level;
    summary.coins = game.profile().coins;
    debug!(seed, level = summary.level_reached, coins = summary.coins, "profile simulated");
    summary
}

/// Pay for a skip if it still leaves a retry's worth of coins
fn try_skip<W: WordService + ?Sized, R: rand::RngCore>(
    game: &mut Game<'_, W, R, MemoryProfileStorage>,
    summary: &mut PlayerSummary,
) -> bool {
    let costs = game.config().costs;
    if game.profile().coins < costs.skip + costs.retry {
        return false;
    }
    match game.use_skip() {
        Ok(_) => {
            summary.skips += 1;
            true
        }
        Err(_) => false,
    }
}

/// Guess until the session ends or the bot gets stuck
fn play_session<W: WordService + ?Sized, R: rand::RngCore>(
    game: &mut Game<'_, W, R, MemoryProfileStorage>,
    pool: &[Word],
    bot_rng: &mut StdRng,
    summary: &mut PlayerSummary,
) {
    loop {
        let Some(session) = game.session() else {
            return;
        };
        if session.status() != SessionStatus::Playing {
            return;
        }

        let candidates = candidates(pool, session);
        let row = session.attempts().len();
        let last_try = session.remaining_attempts() == 1;
        let all_locked = session.locked_positions().len() == WORD_LENGTH;
        let darted = !session.disabled_letters().is_empty();
        let costs = game.config().costs;
        let coins = game.profile().coins;

        if row == 1
            && !darted
            && candidates.len() > DART_THRESHOLD
            && coins >= costs.dart + costs.retry
        {
            if game.use_dart().is_ok() {
                summary.darts += 1;
            }
            continue;
        }
        if last_try
            && candidates.len() > 1
            && !all_locked
            && coins >= costs.hint + costs.retry
            && game.use_hint().is_ok()
        {
            summary.hints += 1;
            continue;
        }

        let guess = candidates
            .choose(bot_rng)
            .copied()
            .or_else(|| pool.choose(bot_rng))
            .map(|w| w.text().to_string());
        let Some(guess) = guess else {
            return;
        };

        match game.guess(&guess) {
            Ok(report) => match report.status {
                SessionStatus::Won => summary.wins += 1,
                SessionStatus::Lost => summary.losses += 1,
                SessionStatus::Playing => {}
            },
            Err(e) => {
                debug!(error = %e, "bot guess failed");
                return;
            }
        }
    }
}

/// Answers consistent with every clue visible to the player
fn candidates<'w>(pool: &'w [Word], session: &Session) -> Vec<&'w Word> {
    pool.iter()
        .filter(|candidate| {
            session
                .attempts()
                .iter()
                .zip(session.feedback())
                .all(|(guess, feedback)| evaluate(guess, candidate) == *feedback)
        })
        .filter(|candidate| {
            session
                .locked_positions()
                .iter()
                .all(|&i| session.buffer().slots()[i] == Some(candidate.letter_at(i)))
        })
        .filter(|candidate| {
            !candidate
                .letters()
                .any(|l| session.disabled_letters().contains(&l))
        })
        .collect()
}
