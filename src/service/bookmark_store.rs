use std::sync::Arc;
use log::{debug, error, warn};
use crate::client::storage_area::StorageArea;
use crate::error::StorageError;
use crate::model::bookmark::BookmarkMap;

pub const BOOKMARKS_STORAGE_KEY: &str = "bookmarks";

/// Whole-map persistence of bookmarks under a single storage key.
#[derive(Clone)]
pub struct BookmarkStore {
    storage_area: Arc<dyn StorageArea>,
    write_attempts: usize,
}

impl BookmarkStore {
    pub fn new(storage_area: Arc<dyn StorageArea>, write_attempts: usize) -> Self {
        BookmarkStore { storage_area, write_attempts: write_attempts.max(1) }
    }

    /// Returns the persisted map. Missing, unreadable or corrupt storage all read as empty.
    pub async fn load_all(&self) -> BookmarkMap {
        match self.storage_area.get(BOOKMARKS_STORAGE_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<BookmarkMap>(value) {
                Ok(bookmark_map) => bookmark_map,
                Err(e) => {
                    warn!("stored bookmarks could not be decoded (treating as empty): [{}]", e);
                    BookmarkMap::new()
                }
            },
            Ok(None) => {
                debug!("no bookmarks stored yet");
                BookmarkMap::new()
            }
            Err(e) => {
                warn!("failed to load bookmarks (treating as empty): [{}]", e);
                BookmarkMap::new()
            }
        }
    }

    /// Returns the persisted map for a read-modify-write. Storage and decode failures are passed
    /// through so a mutation never writes back over bookmarks it could not read.
    pub async fn load_for_update(&self) -> Result<BookmarkMap, StorageError> {
        match self.storage_area.get(BOOKMARKS_STORAGE_KEY).await? {
            Some(value) => Ok(serde_json::from_value::<BookmarkMap>(value)?),
            None => {
                debug!("no bookmarks stored yet");
                Ok(BookmarkMap::new())
            }
        }
    }

    /// Replaces the persisted map with one write, retrying failed writes up to the configured attempts.
    pub async fn save_all(&self, bookmark_map: &BookmarkMap) -> Result<(), StorageError> {
        let value = serde_json::to_value(bookmark_map)?;
        let mut attempt = 1;
        loop {
            match self.storage_area.set(BOOKMARKS_STORAGE_KEY, value.clone()).await {
                Ok(_) => {
                    debug!("saved bookmarks for [{}] pages", bookmark_map.len());
                    return Ok(());
                }
                Err(e) if attempt < self.write_attempts => {
                    warn!("failed to save bookmarks on attempt [{}] (retrying): [{}]", attempt, e);
                    attempt += 1;
                }
                Err(e) => {
                    error!("failed to save bookmarks after attempt [{}]: [{}]", attempt, e);
                    return Err(e);
                }
            }
        }
    }
}
