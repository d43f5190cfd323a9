//! Shared subscriber registry.
//!
//! Owns the in-memory store together with its file. Every mutation runs
//! check, add, and save under one lock, so concurrent handlers adding
//! different chats never lose an update.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{StoreError, SubscriberFile, SubscriberStore};

/// Subscriber set shared by all update handlers.
#[derive(Debug)]
pub struct SubscriberRegistry {
    store: Mutex<SubscriberStore>,
    file: SubscriberFile,
}

impl SubscriberRegistry {
    /// Opens the registry, loading any previously saved subscribers.
    pub fn open(file: SubscriberFile) -> Result<Self, StoreError> {
        let store = SubscriberStore::load_from(file.load()?);
        info!(
            "Loaded {} subscribers from {}",
            store.len(),
            file.path().display()
        );

        Ok(Self {
            store: Mutex::new(store),
            file,
        })
    }

    /// Creates a registry with an explicit starting set.
    #[must_use]
    pub fn with_store(store: SubscriberStore, file: SubscriberFile) -> Self {
        Self {
            store: Mutex::new(store),
            file,
        }
    }

    pub async fn contains(&self, chat_id: i64) -> bool {
        self.store.lock().await.contains(chat_id)
    }

    /// Adds a chat and persists the full set if it was new.
    ///
    /// Returns `true` if the chat was newly added. A failed save is logged;
    /// the chat stays subscribed for the rest of this process.
    pub async fn add_and_persist(&self, chat_id: i64) -> bool {
        let mut store = self.store.lock().await;

        if !store.add_if_absent(chat_id) {
            return false;
        }

        debug!("New subscriber: {}", chat_id);
        if let Err(e) = self.file.save(&store.snapshot()) {
            warn!("Failed to save subscribers: {}", e);
        }
        true
    }

    /// Returns all subscribed chats in ascending order.
    pub async fn snapshot(&self) -> Vec<i64> {
        self.store.lock().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Writes the current set to disk.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let store = self.store.lock().await;
        self.file.save(&store.snapshot())
    }
}
