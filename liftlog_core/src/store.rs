//! Key-value persistence with JSON documents.
//!
//! The engine only needs get/set/remove by key. Each entity kind lives under
//! a fixed key and is stored as a single JSON document that is read whole,
//! modified in memory and written back whole.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Store keys, one per entity kind
pub mod keys {
    pub const PREFERENCES: &str = "workout_preferences";
    pub const EXERCISE_HISTORY: &str = "exercise_history";
    pub const WORKOUT_HISTORY: &str = "workout_history";
    pub const WEEK_COUNTER: &str = "week_counter";

    pub const ALL: [&str; 4] = [PREFERENCES, EXERCISE_HISTORY, WORKOUT_HISTORY, WEEK_COUNTER];
}

/// Durable byte store addressed by string keys
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, mainly for tests and embedding
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store holding one `<key>.json` file per key
///
/// Reads take a shared lock. Writes go to a temp file in the same directory
/// under an exclusive lock, are synced, then renamed over the target.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Store(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = Vec::new();
        let read = std::io::BufReader::new(&file).read_to_end(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decode the document stored under `key`
///
/// A missing key, an unreadable store or a document that does not parse as
/// `T` all yield `T::default()`.
pub fn load_document<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!("No document stored under {}, using default", key);
            return T::default();
        }
        Err(e) => {
            tracing::warn!("Unable to read {}: {}. Using default.", key, e);
            return T::default();
        }
    };

    match serde_json::from_slice::<T>(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse document {}: {}. Using default.", key, e);
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn save_document<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let bytes = serde_json::to_vec(value)?;
    store.set(key, &bytes)
}

/// Remove every entity the engine owns
pub fn clear_all_data<S: KvStore + ?Sized>(store: &mut S) -> Result<()> {
    for key in keys::ALL {
        store.remove(key)?;
    }
    tracing::info!("Cleared all stored workout data");
    Ok(())
}
