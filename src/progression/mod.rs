//! Player progression: profile, storage backends and the store that owns them

mod profile;
mod storage;
mod store;

pub use profile::{GameResult, Profile};
pub use storage::{FileProfileStorage, MemoryProfileStorage, PersistenceError, ProfileStorage};
pub use store::ProgressionStore;
