use std::sync::Arc;
use log::{debug, info, warn};
use crate::client::tab_client::TabClient;
use crate::error::popup_error::PopupError;
use crate::model::bookmark::{sort_for_display, Bookmark};
use crate::model::command::{Command, CommandResponse};
use crate::service::command_router::CommandRouter;
use crate::service::session_context::SessionContext;

/// Control-surface session bound to the tab that was active when it opened. Success values
/// are the messages shown to the user.
pub struct PopupSession {
    router: Arc<CommandRouter>,
    context: SessionContext,
    current_position: f64,
}

impl PopupSession {
    pub async fn open(router: Arc<CommandRouter>, tab_client: &dyn TabClient) -> Result<Self, PopupError> {
        let tab = tab_client.active_tab().await?;
        info!("popup opened on tab [{}] at [{:?}]", tab.id, tab.url);
        let mut popup_session = PopupSession { router, context: SessionContext::new(Some(tab)), current_position: 0.0 };
        popup_session.load_bookmarks().await?;
        popup_session.current_position = popup_session.read_position().await;
        Ok(popup_session)
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn current_position(&self) -> f64 {
        self.current_position
    }

    /// Bookmarks for this page, top of the page first.
    pub fn display_bookmarks(&self) -> Vec<Bookmark> {
        let mut bookmarks = self.context.bookmarks().to_vec();
        sort_for_display(&mut bookmarks);
        bookmarks
    }

    pub async fn load_bookmarks(&mut self) -> Result<(), PopupError> {
        match self.router.dispatch(&self.context, Command::GetBookmarks { url: None }).await? {
            Some(CommandResponse::Bookmarks { bookmarks }) => {
                debug!("popup loaded [{}] bookmarks", bookmarks.len());
                self.context.set_bookmarks(bookmarks);
                Ok(())
            }
            other => Err(PopupError::Failed(format!("Failed to load bookmarks: unexpected reply {:?}", other))),
        }
    }

    pub async fn save_current_position(&mut self, name: &str) -> Result<String, PopupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PopupError::EmptyName);
        }
        let url = self.context.url()
            .ok_or_else(|| PopupError::Failed("Failed to save bookmark: tab has no url".to_string()))?
            .to_string();

        self.current_position = self.read_position().await;
        let command = Command::SaveBookmark {
            url,
            name: Some(name.to_string()),
            scroll_position: self.current_position,
            tab_id: self.context.tab_id(),
        };
        match self.router.dispatch(&self.context, command).await? {
            Some(CommandResponse::Status { success: true, .. }) => {
                self.load_bookmarks().await?;
                Ok("Bookmark saved successfully!".to_string())
            }
            Some(CommandResponse::Status { error: Some(error), .. }) => Err(PopupError::Failed(error)),
            _ => Err(PopupError::Failed("Failed to save bookmark - no response from background script".to_string())),
        }
    }

    pub async fn jump_to(&self, bookmark_id: &str) -> Result<String, PopupError> {
        let bookmark = self.context
            .find_bookmark(bookmark_id)
            .ok_or_else(|| PopupError::BookmarkNotFound(bookmark_id.to_string()))?;
        let command = Command::JumpToBookmark {
            scroll_position: bookmark.scroll_position,
            tab_id: self.context.tab_id(),
        };
        match self.router.dispatch(&self.context, command).await? {
            Some(CommandResponse::Status { success: true, .. }) => Ok(format!("Jumped to \"{}\"", bookmark.name)),
            other => {
                warn!("jump to bookmark [{}] failed: [{:?}]", bookmark_id, other);
                Err(PopupError::Failed("Failed to jump to bookmark".to_string()))
            }
        }
    }

    pub async fn delete(&mut self, bookmark_id: &str) -> Result<String, PopupError> {
        let command = Command::DeleteBookmark { url: None, bookmark_id: bookmark_id.to_string() };
        match self.router.dispatch(&self.context, command).await? {
            Some(CommandResponse::Status { success: true, .. }) => {
                self.load_bookmarks().await?;
                Ok("Bookmark deleted successfully!".to_string())
            }
            _ => Err(PopupError::Failed("Failed to delete bookmark".to_string())),
        }
    }

    async fn read_position(&self) -> f64 {
        match self.router.dispatch(&self.context, Command::GetCurrentPosition).await {
            Ok(Some(CommandResponse::Position { scroll_position })) => scroll_position,
            other => {
                warn!("could not read scroll position (showing 0): [{:?}]", other);
                0.0
            }
        }
    }
}
