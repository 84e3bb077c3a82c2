//! REST API for the support bot.
//!
//! JSON endpoints for authentication, chat, conversation history and
//! orders, plus health and metrics endpoints.

mod error;
mod handlers;
mod rest;

pub use error::*;
pub use handlers::*;
pub use rest::*;
