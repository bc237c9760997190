//! Telegram bot handler tree configuration
//!
//! The same schema is used by the production dispatcher and by integration
//! tests, which run it against a mock bot.

mod commands;
mod photos;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
