//! Command implementations

pub mod play;
pub mod settings;
pub mod simulate;
pub mod stats;

pub use play::{PlayCommand, run_play};
pub use simulate::{PlayerSummary, SimulationConfig, SimulationResult, play_profile, run_simulation};
pub use settings::run_config;
pub use stats::run_stats;
