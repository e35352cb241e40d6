//! Client controller for a video grabber backend: validates a pasted URL,
//! analyzes it, offers the available formats, and follows the download.

pub mod backend_bridge;
pub mod config;
pub mod controller;
pub mod terminal;
pub mod ui;
