//! tasks CLI - modules exposed for unit tests

pub mod app;
pub mod commands;
pub mod error;
pub mod logging;
