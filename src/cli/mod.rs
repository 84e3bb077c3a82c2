//! CLI module for the supportbot command-line interface.
//!
//! Offline commands that exercise the classifier and auth helpers without
//! starting the HTTP server.

mod commands;
mod output;

pub use commands::*;
