use crate::model::bookmark::Bookmark;
use crate::model::tab::{TabId, TabInfo};

/// State scoped to one control-surface session: the tab it was opened on and the last
/// bookmark list it loaded. Handlers read fallbacks from here instead of global state.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    current_tab: Option<TabInfo>,
    bookmarks: Vec<Bookmark>,
}

impl SessionContext {
    pub fn new(current_tab: Option<TabInfo>) -> Self {
        Self { current_tab, bookmarks: vec![] }
    }

    /// A context with no tab, for transports where every command names its own target.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn current_tab(&self) -> Option<&TabInfo> {
        self.current_tab.as_ref()
    }

    pub fn tab_id(&self) -> Option<TabId> {
        self.current_tab.as_ref().map(|tab| tab.id)
    }

    pub fn url(&self) -> Option<&str> {
        self.current_tab.as_ref().and_then(|tab| tab.url.as_deref())
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmarks = bookmarks;
    }

    pub fn find_bookmark(&self, bookmark_id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|bookmark| bookmark.id == bookmark_id)
    }
}
