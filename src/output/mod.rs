//! Terminal output formatting
//!
//! Display utilities for the play screen and command results.

pub mod display;
pub mod formatters;

pub use display::{
    print_booster_menu, print_config, print_level_result, print_play_screen, print_profile_stats,
    print_simulation_result,
};
