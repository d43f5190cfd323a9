//! Subscriber set and its JSON file.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading or writing the subscriber file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access subscriber file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Subscriber file {path} is not a JSON array of chat ids: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize subscribers: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory set of subscribed chat ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberStore {
    ids: HashSet<i64>,
}

impl SubscriberStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted ids.
    #[must_use]
    pub fn load_from(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`, returning `true` if it was not already present.
    pub fn add_if_absent(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    /// Returns all ids in ascending order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Location of the persisted subscriber list.
#[derive(Debug, Clone)]
pub struct SubscriberFile {
    path: PathBuf,
}

impl SubscriberFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted ids.
    ///
    /// A missing file is an empty list. A file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(&self) -> Result<Vec<i64>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file contents with `ids`.
    ///
    /// Writes a sibling temporary file first and renames it into place.
    pub fn save(&self, ids: &[i64]) -> Result<(), StoreError> {
        let json = serde_json::to_string(ids)?;
        let tmp_path = self.tmp_path();

        std::fs::write(&tmp_path, json)
            .and_then(|()| std::fs::rename(&tmp_path, &self.path))
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
