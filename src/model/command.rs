use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::model::bookmark::Bookmark;
use crate::model::tab::TabId;

/// Every message the router accepts, tagged by `action` on the wire.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    SaveBookmark {
        url: String,
        name: Option<String>,
        scroll_position: f64,
        tab_id: Option<TabId>,
    },
    #[serde(rename_all = "camelCase")]
    GetBookmarks {
        url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteBookmark {
        url: Option<String>,
        bookmark_id: String,
    },
    #[serde(rename_all = "camelCase")]
    JumpToBookmark {
        scroll_position: f64,
        tab_id: Option<TabId>,
    },
    #[serde(rename_all = "camelCase")]
    ScrollToPosition {
        scroll_position: f64,
    },
    GetCurrentPosition,
    BookmarkSaved {
        bookmark: Bookmark,
    },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SaveBookmark { .. } => "saveBookmark",
            Command::GetBookmarks { .. } => "getBookmarks",
            Command::DeleteBookmark { .. } => "deleteBookmark",
            Command::JumpToBookmark { .. } => "jumpToBookmark",
            Command::ScrollToPosition { .. } => "scrollToPosition",
            Command::GetCurrentPosition => "getCurrentPosition",
            Command::BookmarkSaved { .. } => "bookmarkSaved",
        }
    }

    /// Commands the resident page agent answers rather than the background side.
    pub fn is_agent_directed(&self) -> bool {
        matches!(self, Command::ScrollToPosition { .. } | Command::GetCurrentPosition | Command::BookmarkSaved { .. })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CommandResponse {
    Status {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Bookmarks {
        bookmarks: Vec<Bookmark>,
    },
    #[serde(rename_all = "camelCase")]
    Position {
        scroll_position: f64,
    },
}

impl CommandResponse {
    pub fn success() -> Self {
        CommandResponse::Status { success: true, error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        CommandResponse::Status { success: false, error: Some(error.into()) }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, CommandResponse::Status { success: false, .. })
    }
}
