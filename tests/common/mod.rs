//! Common test utilities
//!
//! In-memory stand-ins for Telegram file download, Drive and Sheets, shared
//! across the integration tests.

#![allow(dead_code)]

pub mod fakes;

#[allow(unused_imports)]
pub use fakes::{FakeDrive, FakeSheet, FakeSource, TestPipeline};
