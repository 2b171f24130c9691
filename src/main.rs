//! Wordle Levels - CLI
//!
//! Level-based Wordle with coins, boosters and a saved profile.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use wordle_levels::{
    commands::{SimulationConfig, run_config, run_play, run_simulation, run_stats},
    config::{AppDirs, ConfigStore, FileConfigStore},
    game::Game,
    output::print_simulation_result,
    progression::{FileProfileStorage, ProgressionStore},
    wordlists::WordList,
};

#[derive(Parser)]
#[command(
    name = "wordle_levels",
    about = "Level-based Wordle with a coin economy and boosters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'embedded' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Profile file (default: platform data directory)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Config file with booster prices (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play levels interactively (default)
    Play,

    /// Show the saved profile
    Stats,

    /// Simulate many players to check the coin economy
    Simulate {
        /// Number of simulated profiles
        #[arg(short = 'n', long, default_value = "100")]
        players: usize,

        /// Levels each profile tries to clear
        #[arg(short, long, default_value = "20")]
        levels: u32,

        /// Base random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Show the booster prices, or write them to the config file
    Config {
        /// Save the effective config to the config file
        #[arg(long)]
        write: bool,
    },
}

fn load_wordlist(mode: &str) -> Result<WordList> {
    match mode {
        "embedded" => WordList::embedded().context("embedded answer list is empty"),
        path => WordList::from_file(path).with_context(|| format!("loading wordlist {path}")),
    }
}

fn open_store(path: Option<PathBuf>) -> Result<ProgressionStore<FileProfileStorage>> {
    let path = path
        .or_else(AppDirs::profile_path)
        .unwrap_or_else(|| PathBuf::from("profile.json"));
    debug!(path = %path.display(), "opening profile");
    ProgressionStore::open(FileProfileStorage::with_path(&path))
        .with_context(|| format!("reading profile {}", path.display()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_store = cli
        .config
        .as_ref()
        .map_or_else(FileConfigStore::new, FileConfigStore::with_path);
    let game_config = config_store.load();
    debug!(?game_config, path = %config_store.path().display(), "config loaded");

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => {
            let words = load_wordlist(&cli.wordlist)?;
            let store = open_store(cli.profile)?;
            let mut game = Game::new(&words, rand::rng(), game_config, store);
            run_play(&mut game, &mut io::stdin().lock()).context("reading input")
        }
        Commands::Stats => {
            let store = open_store(cli.profile)?;
            run_stats(&store);
            Ok(())
        }
        Commands::Simulate {
            players,
            levels,
            seed,
        } => {
            let words = load_wordlist(&cli.wordlist)?;
            println!("Simulating {players} profiles through {levels} levels...");
            let result = run_simulation(
                &words,
                words.answers(),
                game_config,
                &SimulationConfig {
                    players,
                    levels,
                    seed,
                    show_progress: true,
                },
            );
            print_simulation_result(&result);
            Ok(())
        }
        Commands::Config { write } => {
            run_config(&config_store, write)
                .with_context(|| format!("writing config {}", config_store.path().display()))?;
            Ok(())
        }
    }
}
