use std::sync::Arc;
use log::{debug, info, warn};
use tokio::sync::Mutex;
use crate::client::tab_client::TabClient;
use crate::error::bookmark_error::BookmarkError;
use crate::model::bookmark::Bookmark;
use crate::model::command::Command;
use crate::model::page_key::PageKey;
use crate::model::tab::TabId;
use crate::service::bookmark_store::BookmarkStore;

/// Create, list and delete bookmarks keyed by page. Every mutation reloads and rewrites the
/// whole map; mutations issued through one service are serialised so they cannot overwrite
/// each other, but writers in other contexts still race (last write wins).
pub struct BookmarkService {
    bookmark_store: BookmarkStore,
    tab_client: Arc<dyn TabClient>,
    mutation_lock: Mutex<()>,
}

impl BookmarkService {
    pub fn new(bookmark_store: BookmarkStore, tab_client: Arc<dyn TabClient>) -> Self {
        BookmarkService { bookmark_store, tab_client, mutation_lock: Mutex::new(()) }
    }

    pub async fn save(&self, page_url: &str, name: Option<String>, scroll_position: f64, tab_id: Option<TabId>) -> Result<Bookmark, BookmarkError> {
        if !scroll_position.is_finite() || scroll_position < 0.0 {
            return Err(BookmarkError::InvalidPosition(format!("[{}] is not a non-negative offset", scroll_position)));
        }
        let page_key = PageKey::normalize(page_url)?;

        let bookmark = {
            let _guard = self.mutation_lock.lock().await;
            let mut bookmark_map = self.bookmark_store.load_for_update().await?;
            let bookmarks = bookmark_map.entry(page_key.clone()).or_default();
            let name = name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| Bookmark::default_name(bookmarks.len()));
            let bookmark = Bookmark::new(name, scroll_position, page_url.to_string());
            bookmarks.push(bookmark.clone());
            self.bookmark_store.save_all(&bookmark_map).await?;
            bookmark
        };
        info!("saved bookmark [{}] named [{}] at [{}] for page [{}]", bookmark.id, bookmark.name, bookmark.scroll_position, page_key);

        if let Some(tab_id) = tab_id {
            self.notify_saved(tab_id, bookmark.clone());
        }
        Ok(bookmark)
    }

    /// Bookmarks for the page in insertion order. Unknown or unparseable URLs list as empty.
    pub async fn list(&self, page_url: Option<&str>) -> Vec<Bookmark> {
        let Some(page_url) = page_url else {
            warn!("bookmarks requested without a url");
            return vec![];
        };
        let page_key = match PageKey::normalize(page_url) {
            Ok(page_key) => page_key,
            Err(e) => {
                warn!("bookmarks requested for unusable url [{}]: [{}]", page_url, e);
                return vec![];
            }
        };
        let bookmarks = self.bookmark_store.load_all().await
            .shift_remove(&page_key)
            .unwrap_or_default();
        debug!("listed [{}] bookmarks for page [{}]", bookmarks.len(), page_key);
        bookmarks
    }

    /// Removes the bookmark with `bookmark_id` from the page. Unknown ids leave the store untouched.
    pub async fn delete(&self, page_url: &str, bookmark_id: &str) -> Result<(), BookmarkError> {
        let page_key = PageKey::normalize(page_url)?;

        let _guard = self.mutation_lock.lock().await;
        let mut bookmark_map = self.bookmark_store.load_for_update().await?;
        let Some(bookmarks) = bookmark_map.get_mut(&page_key) else {
            debug!("no bookmarks stored for page [{}], nothing to delete", page_key);
            return Ok(());
        };
        let before = bookmarks.len();
        bookmarks.retain(|bookmark| bookmark.id != bookmark_id);
        if bookmarks.len() == before {
            debug!("bookmark [{}] not found for page [{}], nothing to delete", bookmark_id, page_key);
            return Ok(());
        }
        self.bookmark_store.save_all(&bookmark_map).await?;
        info!("deleted bookmark [{}] for page [{}]", bookmark_id, page_key);
        Ok(())
    }

    /// Tells the tab's page agent about the new bookmark without waiting for it.
    fn notify_saved(&self, tab_id: TabId, bookmark: Bookmark) {
        let tab_client = self.tab_client.clone();
        tokio::spawn(async move {
            if let Err(e) = tab_client.send_message(tab_id, &Command::BookmarkSaved { bookmark }).await {
                warn!("could not notify page agent in tab [{}] of saved bookmark: [{}]", tab_id, e);
            }
        });
    }
}
