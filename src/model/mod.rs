pub mod bookmark;
pub mod command;
pub mod page_key;
pub mod tab;
