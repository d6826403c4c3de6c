use serde::Serialize;
use thiserror::Error;
use crate::error::router_error::RouterError;
use crate::error::TabError;

/// User-visible failures of the popup control surface.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum PopupError {
    #[error("No active tab found")]
    NoActiveTab,
    #[error("Please enter a bookmark name")]
    EmptyName,
    #[error("Bookmark not found")]
    BookmarkNotFound(String),
    #[error("{0}")]
    Failed(String),
    #[error("router error: {0}")]
    Router(RouterError),
}

impl From<RouterError> for PopupError {
    fn from(value: RouterError) -> Self {
        Self::Router(value)
    }
}

impl From<TabError> for PopupError {
    fn from(value: TabError) -> Self {
        match value {
            TabError::NoActiveTab => Self::NoActiveTab,
            other => Self::Failed(format!("Failed to initialize popup: {}", other)),
        }
    }
}
