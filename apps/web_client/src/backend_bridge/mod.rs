//! Bridge between the controller's command queue and the backend worker.

pub mod commands;
pub mod runtime;
