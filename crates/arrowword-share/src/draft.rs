use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use arrowword_core::{GRID_SIZE, Grid};
use serde::{Deserialize, Serialize};

use crate::{WireCell, grid_from_wire, grid_to_wire};

/// Storage key of the draft slot.
pub const DRAFT_KEY: &str = "arrowword_draft_v1";

const PROBE_KEY: &str = "__arrowword_probe__";

/// Errors raised by a [`DraftStore`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[display("draft storage I/O failed: {_0}")]
    Io(io::Error),
    /// The store refuses all access.
    #[display("draft storage is unavailable")]
    #[from(ignore)]
    Unavailable,
}

/// A string key-value store for drafts.
pub trait DraftStore {
    /// Checks once that the store can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing is impossible.
    fn probe(&mut self) -> Result<(), StorageError> {
        self.set_string(PROBE_KEY, "1")?;
        self.remove(PROBE_KEY)
    }

    /// Reads a value, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value; removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// A store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// Creates a store in `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// An in-memory store, optionally failing every access.
#[derive(Debug, Default, Clone)]
pub struct MemoryDraftStore {
    values: HashMap<String, String>,
    failing: bool,
}

impl MemoryDraftStore {
    /// Creates an empty working store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects every access.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            values: HashMap::new(),
            failing: true,
        }
    }

    /// Makes later accesses fail or succeed.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl DraftStore for MemoryDraftStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DraftDocument {
    grid: Vec<Vec<WireCell>>,
}

/// Serializes a grid into the draft document.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn encode_draft(grid: &Grid) -> Result<String, serde_json::Error> {
    serde_json::to_string(&DraftDocument {
        grid: grid_to_wire(grid),
    })
}

/// Reads the stored draft.
///
/// Returns `None` when no draft exists or it cannot be used; a draft whose
/// row count is not 12 is ignored silently, other failures are logged.
pub fn load_draft(store: &impl DraftStore) -> Option<Grid> {
    let text = match store.get_string(DRAFT_KEY) {
        Ok(text) => text?,
        Err(e) => {
            log::warn!("failed to read draft: {e}");
            return None;
        }
    };
    let document: DraftDocument = match serde_json::from_str(&text) {
        Ok(document) => document,
        Err(e) => {
            log::warn!("failed to parse draft: {e}");
            return None;
        }
    };
    if document.grid.len() != GRID_SIZE {
        log::debug!("ignoring draft with {} rows", document.grid.len());
        return None;
    }
    match grid_from_wire(document.grid) {
        Ok(grid) => Some(grid),
        Err(e) => {
            log::warn!("failed to load draft: {e}");
            None
        }
    }
}
