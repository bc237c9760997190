//! Google Drive and Google Sheets REST clients

pub mod auth;
pub mod client;
pub mod drive;
pub mod sheets;

pub use auth::{ServiceAccountTokens, StaticToken, TokenSource};
pub use client::GoogleClient;
pub use drive::{public_view_url, DriveClient};
pub use sheets::SheetsClient;
