//! Profile storage backends
//!
//! A backend must be all-or-nothing: after a crash or failed save, `load`
//! returns either the previous profile or the new one, never a mix.

use super::Profile;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, trace};

/// Why a profile could not be read or written
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("profile I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("profile data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait ProfileStorage {
    /// Previously saved profile, or `None` if nothing was ever saved
    fn load(&self) -> Result<Option<Profile>, PersistenceError>;

    /// Replace the stored profile in one step
    fn save(&self, profile: &Profile) -> Result<(), PersistenceError>;
}

/// JSON file written via temp-file-and-rename
///
/// Saves through the same handle are serialized by an internal lock.
#[derive(Debug)]
pub struct FileProfileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProfileStorage {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl ProfileStorage for FileProfileStorage {
    fn load(&self) -> Result<Option<Profile>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved profile");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let profile = serde_json::from_slice(&bytes)?;
        Ok(Some(profile))
    }

    fn save(&self, profile: &Profile) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        // Temp file lives beside the target so the rename never crosses filesystems
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, profile)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        trace!(path = %self.path.display(), "profile written");
        Ok(())
    }
}

/// In-process storage with failure injection
#[derive(Debug, Default)]
pub struct MemoryProfileStorage {
    saved: Mutex<Option<Profile>>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryProfileStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing saved profile
    #[must_use]
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            saved: Mutex::new(Some(profile)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The last successfully saved profile
    #[must_use]
    pub fn saved(&self) -> Option<Profile> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ProfileStorage for MemoryProfileStorage {
    fn load(&self) -> Result<Option<Profile>, PersistenceError> {
        Ok(self.saved())
    }

    fn save(&self, profile: &Profile) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "simulated storage failure".to_string(),
            ));
        }
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::GameResult;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_profile(coins: u32) -> Profile {
        let mut profile = Profile {
            coins,
            current_level: 4,
            max_level: 3,
            max_score: 90,
            max_time: Some(Duration::from_millis(2500)),
            ..Profile::default()
        };
        profile.history.push_front(GameResult {
            level: 3,
            won: true,
            attempts: 1,
            completion_time: Duration::from_millis(2500),
            score: 90,
            skipped: false,
        });
        profile
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let storage = FileProfileStorage::with_path(dir.path().join("profile.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn file_roundtrip_reproduces_profile() {
        let dir = tempdir().unwrap();
        let storage = FileProfileStorage::with_path(dir.path().join("nested").join("profile.json"));
        let profile = sample_profile(77);

        storage.save(&profile).unwrap();
        assert_eq!(storage.load().unwrap(), Some(profile));
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let storage = FileProfileStorage::with_path(dir.path().join("profile.json"));

        storage.save(&sample_profile(1)).unwrap();
        storage.save(&sample_profile(2)).unwrap();
        assert_eq!(storage.load().unwrap().unwrap().coins, 2);

        // No temp files left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{\"coins\": 12").unwrap();

        let err = FileProfileStorage::with_path(&path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Serialization(_)));
    }

    #[test]
    fn concurrent_saves_leave_a_complete_profile() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileProfileStorage::with_path(dir.path().join("profile.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || {
                    for _ in 0..5 {
                        storage.save(&sample_profile(i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = storage.load().unwrap().unwrap();
        assert!(loaded.coins < 8);
        assert_eq!(loaded.history.len(), 1);
    }

    #[test]
    fn memory_storage_failure_injection() {
        let storage = MemoryProfileStorage::new();
        storage.save(&sample_profile(5)).unwrap();

        storage.set_failing(true);
        assert!(storage.save(&sample_profile(6)).is_err());
        assert_eq!(storage.saved().unwrap().coins, 5);
        assert_eq!(storage.save_count(), 1);

        storage.set_failing(false);
        storage.save(&sample_profile(7)).unwrap();
        assert_eq!(storage.load().unwrap().unwrap().coins, 7);
    }
}
