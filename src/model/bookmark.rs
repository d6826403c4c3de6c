use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use crate::model::page_key::PageKey;

/// Persisted bookmark layout: page key to bookmarks in insertion order.
pub type BookmarkMap = IndexMap<PageKey, Vec<Bookmark>>;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[schema(read_only)]
    pub id: String,
    pub name: String,
    pub scroll_position: f64,
    pub url: String,
    #[schema(read_only)]
    pub timestamp: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(name: String, scroll_position: f64, url: String) -> Self {
        Bookmark {
            id: Uuid::now_v7().to_string(),
            name,
            scroll_position,
            url,
            timestamp: Utc::now(),
        }
    }

    pub fn default_name(existing_count: usize) -> String {
        format!("Bookmark {}", existing_count + 1)
    }
}

/// Orders bookmarks ascending by scroll position, keeping creation order for ties.
pub fn sort_for_display(bookmarks: &mut [Bookmark]) {
    bookmarks.sort_by(|a, b| a.scroll_position.total_cmp(&b.scroll_position));
}
