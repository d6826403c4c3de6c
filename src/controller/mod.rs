pub mod bookmark_controller;
pub mod command_controller;
