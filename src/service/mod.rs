pub mod bookmark_service;
pub mod bookmark_store;
pub mod command_router;
pub mod page_agent;
pub mod popup_session;
pub mod scroll_accessor;
pub mod scroll_strategy;
pub mod session_context;
