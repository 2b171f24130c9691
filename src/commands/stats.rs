//! Profile summary

use crate::output::print_profile_stats;
use crate::progression::{ProfileStorage, ProgressionStore};

/// Print the stored profile's records and recent history
pub fn run_stats<S: ProfileStorage>(store: &ProgressionStore<S>) {
    print_profile_stats(store.profile());
}
