//! Show or write the booster price config

use crate::config::{ConfigStore, FileConfigStore, GameConfig};
use crate::output::print_config;
use std::io;
use tracing::info;

/// Print the effective config; with `write`, save it to the store's path
///
/// Writing fills a missing or partial file with every field, so it can be
/// edited by hand afterwards.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
pub fn run_config(store: &FileConfigStore, write: bool) -> io::Result<GameConfig> {
    let config = store.load();
    if write {
        store.save(&config)?;
        info!(path = %store.path().display(), "config written");
    }
    print_config(&config, store.path(), write);
    Ok(config)
}
