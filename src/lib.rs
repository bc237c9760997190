//! Photosheet - Telegram bot that files photos into Google Drive and Sheets
//!
//! Every photo sent to the bot is uploaded to Google Drive, shared publicly,
//! and its link written into the next free cell of a spreadsheet: odd photos
//! of a batch in column C, even photos in column D.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and metrics
//! - `ingest`: per-chat counters, target cells and the ingestion pipeline
//! - `google`: Drive and Sheets REST clients
//! - `telegram`: bot setup and the dispatcher handler tree

pub mod cli;
pub mod core;
pub mod google;
pub mod ingest;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{AppError, PipelineError, Settings};
pub use ingest::{PhotoPipeline, SessionStore};
pub use telegram::{create_bot, schema, HandlerDeps};
